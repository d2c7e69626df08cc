//! Statement emission.
//!
//! Every statement kind is emitted as complete lines ending in a newline.

use super::CodeGenerator;
use crate::backend::Backend;
use crate::error::{Result, TranspileError};
use crate::ir::*;

impl<B: Backend> CodeGenerator<'_, B> {
    pub(super) fn emit_stmt(&mut self, stmt: &IrStmt) -> Result<()> {
        match stmt {
            IrStmt::Include { path } => {
                self.fill();
                self.write(&format!("#include <{path}>\n"));
                Ok(())
            }

            IrStmt::Comment { text } => {
                self.emit_comment(text);
                Ok(())
            }

            IrStmt::Function(func) => self.emit_function(func),

            IrStmt::Declaration { .. } | IrStmt::Assign { .. } => {
                self.statement(|g| g.write_simple_stmt(stmt))
            }

            IrStmt::Expr(expr) => self.statement(|g| g.write_expr(expr)),

            IrStmt::Return { value } => self.statement(|g| {
                g.write("return");
                if let Some(value) = value {
                    g.write(" ");
                    g.write_expr(value)?;
                }
                Ok(())
            }),

            IrStmt::Break => self.statement(|g| {
                g.write("break");
                Ok(())
            }),

            IrStmt::Continue => self.statement(|g| {
                g.write("continue");
                Ok(())
            }),

            IrStmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.fill();
                let result = self.write_if_chain(cond, then_block, else_block.as_ref());
                self.write("\n");
                result
            }

            IrStmt::While { cond, body } => {
                self.fill();
                let result = self
                    .delimited("while (", ")", |g| g.write_expr(cond))
                    .and_then(|()| self.block(|g| g.emit_block(body)));
                self.write("\n");
                result
            }

            IrStmt::For { header, body } => {
                self.fill();
                let result = self
                    .delimited("for (", ")", |g| g.write_for_header(header))
                    .and_then(|()| self.block(|g| g.emit_block(body)));
                self.write("\n");
                result
            }
        }
    }

    fn emit_block(&mut self, block: &IrBlock) -> Result<()> {
        for stmt in &block.statements {
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    fn emit_function(&mut self, func: &IrFunction) -> Result<()> {
        self.fill();
        let return_type = self.backend.return_type_name(&func.return_type)?;
        self.write(&return_type);
        self.write(" ");
        self.write(&func.name);
        let result = self
            .delimited("(", ")", |g| {
                for (idx, param) in func.params.iter().enumerate() {
                    if idx > 0 {
                        g.write(", ");
                    }
                    let ty = g.backend.type_name(&param.ty)?;
                    g.write(&ty);
                    g.write(" ");
                    g.write(&param.name);
                }
                Ok(())
            })
            .and_then(|()| self.block(|g| g.emit_block(&func.body)));
        self.write("\n");
        result
    }

    /// `if (...) {...}`, folding a lone nested `if` in the else branch into
    /// `else if`.
    fn write_if_chain(
        &mut self,
        cond: &IrExpr,
        then_block: &IrBlock,
        else_block: Option<&IrBlock>,
    ) -> Result<()> {
        self.delimited("if (", ")", |g| g.write_expr(cond))?;
        self.block(|g| g.emit_block(then_block))?;

        let Some(else_block) = else_block else {
            return Ok(());
        };
        if let [IrStmt::If {
            cond,
            then_block,
            else_block,
        }] = else_block.statements.as_slice()
        {
            self.write(" else ");
            return self.write_if_chain(cond, then_block, else_block.as_ref());
        }
        self.write(" else");
        self.block(|g| g.emit_block(else_block))
    }

    /// Declaration or assignment without the terminating `;`.
    fn write_simple_stmt(&mut self, stmt: &IrStmt) -> Result<()> {
        match stmt {
            IrStmt::Declaration { ty, target, value } => {
                let ty = self.backend.type_name(ty)?;
                self.write(&ty);
                self.write(" ");
                self.write(target);
                self.write(" = ");
                self.write_expr(value)
            }
            IrStmt::Assign { target, value } => {
                self.write(target);
                self.write(" = ");
                self.write_expr(value)
            }
            other => Err(TranspileError::contract(format!(
                "for_initializer_{}",
                other.kind()
            ))),
        }
    }

    fn write_for_header(&mut self, header: &ForHeader) -> Result<()> {
        match header {
            ForHeader::Counted { init, cond, update } => {
                self.write_simple_stmt(init)?;
                self.write("; ");
                self.write_expr(cond)?;
                self.write("; ");
                self.write_expr(update)
            }
            ForHeader::Ranged { var, iterable } => {
                self.write("auto ");
                self.write(var);
                self.write(" : ");
                self.write_expr(iterable)
            }
            ForHeader::Unresolved { .. } => {
                Err(TranspileError::contract("unresolved_for_header"))
            }
        }
    }

    fn emit_comment(&mut self, text: &str) {
        self.fill();
        self.write("/*\n");
        for line in cleandoc(text) {
            self.fill();
            if line.is_empty() {
                self.write(" *\n");
            } else {
                self.write(" * ");
                self.write(&line.replace("*/", "* /"));
                self.write("\n");
            }
        }
        self.fill();
        self.write(" */\n");
    }
}

/// Docstring normalization: trim the first line, remove the common
/// indentation of the rest, drop leading and trailing blank lines.
fn cleandoc(text: &str) -> Vec<String> {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default().trim();
    let rest: Vec<&str> = lines.collect();

    let margin = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = std::iter::once(first.to_string())
        .chain(rest.iter().map(|line| {
            line.get(margin..).unwrap_or_default().trim_end().to_string()
        }))
        .collect();

    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    let leading = out.iter().take_while(|line| line.is_empty()).count();
    out.drain(..leading);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CppBackend;

    fn emit(stmt: &IrStmt) -> Result<String> {
        let backend = CppBackend;
        let mut generator = CodeGenerator::new(&backend);
        generator.emit_stmt(stmt)?;
        Ok(generator.finish())
    }

    #[test]
    fn test_counted_for() {
        let stmt = IrStmt::For {
            header: ForHeader::Counted {
                init: Box::new(IrStmt::Declaration {
                    ty: IrType::named("int"),
                    target: "i".to_string(),
                    value: IrExpr::int(0),
                }),
                cond: IrExpr::binary(BinOp::Lt, IrExpr::identifier("i"), IrExpr::int(3)),
                update: IrExpr::Assignment {
                    target: "i".to_string(),
                    op: Some(BinOp::Add),
                    value: Box::new(IrExpr::int(1)),
                },
            },
            body: IrBlock::new(vec![IrStmt::Continue]),
        };
        assert_eq!(
            emit(&stmt).unwrap(),
            "for (int i = 0; i < 3; i += 1) {\n    continue;\n}\n"
        );
    }

    #[test]
    fn test_ranged_for() {
        let stmt = IrStmt::For {
            header: ForHeader::Ranged {
                var: "x".to_string(),
                iterable: IrExpr::identifier("xs"),
            },
            body: IrBlock::default(),
        };
        assert_eq!(emit(&stmt).unwrap(), "for (auto x : xs) {\n}\n");
    }

    #[test]
    fn test_else_if_chain() {
        let stmt = IrStmt::If {
            cond: IrExpr::identifier("a"),
            then_block: IrBlock::new(vec![IrStmt::Break]),
            else_block: Some(IrBlock::new(vec![IrStmt::If {
                cond: IrExpr::identifier("b"),
                then_block: IrBlock::default(),
                else_block: Some(IrBlock::new(vec![IrStmt::Continue])),
            }])),
        };
        assert_eq!(
            emit(&stmt).unwrap(),
            "if (a) {\n    break;\n} else if (b) {\n} else {\n    continue;\n}\n"
        );
    }

    #[test]
    fn test_function_signature() {
        let stmt = IrStmt::Function(IrFunction {
            name: "add".to_string(),
            return_type: IrType::named("int"),
            params: vec![
                IrParam {
                    name: "a".to_string(),
                    ty: IrType::named("int"),
                },
                IrParam {
                    name: "b".to_string(),
                    ty: IrType::Inferred,
                },
            ],
            body: IrBlock::new(vec![IrStmt::Return {
                value: Some(IrExpr::binary(
                    BinOp::Add,
                    IrExpr::identifier("a"),
                    IrExpr::identifier("b"),
                )),
            }]),
        });
        assert_eq!(
            emit(&stmt).unwrap(),
            "int add(int a, auto b) {\n    return a + b;\n}\n"
        );
    }

    #[test]
    fn test_none_spells_void_only_as_return_type() {
        let function = |param_ty: IrType| {
            IrStmt::Function(IrFunction {
                name: "log".to_string(),
                return_type: IrType::named("None"),
                params: vec![IrParam {
                    name: "m".to_string(),
                    ty: param_ty,
                }],
                body: IrBlock::default(),
            })
        };
        assert_eq!(
            emit(&function(IrType::named("str"))).unwrap(),
            "void log(std::string m) {\n}\n"
        );
        assert_eq!(
            emit(&function(IrType::named("None"))).unwrap_err(),
            TranspileError::unsupported("none_type_outside_return")
        );

        let stmt = IrStmt::Declaration {
            ty: IrType::named("None"),
            target: "x".to_string(),
            value: IrExpr::Literal(IrLiteral::Null),
        };
        assert_eq!(
            emit(&stmt).unwrap_err(),
            TranspileError::unsupported("none_type_outside_return")
        );
    }

    #[test]
    fn test_unmapped_declaration_type() {
        let stmt = IrStmt::Declaration {
            ty: IrType::named("Widget"),
            target: "w".to_string(),
            value: IrExpr::int(0),
        };
        assert_eq!(
            emit(&stmt).unwrap_err(),
            TranspileError::unsupported("unmapped_type_widget")
        );
    }

    #[test]
    fn test_counted_init_must_be_simple() {
        let header = ForHeader::Counted {
            init: Box::new(IrStmt::Break),
            cond: IrExpr::identifier("c"),
            update: IrExpr::identifier("u"),
        };
        let stmt = IrStmt::For {
            header,
            body: IrBlock::default(),
        };
        assert_eq!(
            emit(&stmt).unwrap_err(),
            TranspileError::contract("for_initializer_break")
        );
    }

    #[test]
    fn test_comment_dedent_and_escape() {
        let stmt = IrStmt::Comment {
            text: "Summary.\n\n    Details with */ inside.\n      indented\n    ".to_string(),
        };
        assert_eq!(
            emit(&stmt).unwrap(),
            "/*\n * Summary.\n *\n * Details with * / inside.\n *   indented\n */\n"
        );
    }
}

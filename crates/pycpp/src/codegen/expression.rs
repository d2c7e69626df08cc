//! Expression emission.
//!
//! A top-level expression is written bare. Nested binary and assignment
//! operands are parenthesized, except the left operand of a binary node with
//! the same operator (all C++ binary operators used here are
//! left-associative), so `std::cout << a << b` stays flat.

use super::CodeGenerator;
use crate::backend::Backend;
use crate::error::Result;
use crate::ir::*;

impl<B: Backend> CodeGenerator<'_, B> {
    pub(super) fn write_expr(&mut self, expr: &IrExpr) -> Result<()> {
        match expr {
            IrExpr::Literal(lit) => {
                let text = self.backend.literal(lit);
                self.write(&text);
                Ok(())
            }

            IrExpr::Identifier(name) => {
                self.write(name);
                Ok(())
            }

            IrExpr::Unary { op, operand } => {
                self.write(self.backend.unary_operator(*op));
                let nested = match operand.as_ref() {
                    IrExpr::Unary { .. } | IrExpr::Binary { .. } | IrExpr::Assignment { .. } => {
                        true
                    }
                    // `-(-3)`, never `--3`.
                    IrExpr::Literal(lit) => self.backend.literal(lit).starts_with('-'),
                    _ => false,
                };
                self.write_operand(operand, nested)
            }

            IrExpr::Binary { op, lhs, rhs } => {
                let flat_lhs =
                    matches!(lhs.as_ref(), IrExpr::Binary { op: inner, .. } if inner == op);
                self.write_operand(lhs, !flat_lhs && is_compound(lhs))?;
                self.write(" ");
                self.write(self.backend.binary_operator(*op));
                self.write(" ");
                self.write_operand(rhs, is_compound(rhs))
            }

            IrExpr::Assignment { target, op, value } => {
                self.write(target);
                match op {
                    Some(op) => {
                        self.write(" ");
                        self.write(self.backend.binary_operator(*op));
                        self.write("= ");
                    }
                    None => self.write(" = "),
                }
                self.write_expr(value)
            }

            IrExpr::Call { callee, args } => {
                self.write(callee);
                self.delimited("(", ")", |g| {
                    for (idx, arg) in args.iter().enumerate() {
                        if idx > 0 {
                            g.write(", ");
                        }
                        g.write_expr(arg)?;
                    }
                    Ok(())
                })
            }
        }
    }

    fn write_operand(&mut self, expr: &IrExpr, parenthesize: bool) -> Result<()> {
        if parenthesize {
            self.delimited("(", ")", |g| g.write_expr(expr))
        } else {
            self.write_expr(expr)
        }
    }
}

fn is_compound(expr: &IrExpr) -> bool {
    matches!(expr, IrExpr::Binary { .. } | IrExpr::Assignment { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CppBackend;

    fn render(expr: &IrExpr) -> String {
        let backend = CppBackend;
        let mut generator = CodeGenerator::new(&backend);
        generator.write_expr(expr).unwrap();
        generator.finish()
    }

    fn id(name: &str) -> IrExpr {
        IrExpr::identifier(name)
    }

    #[test]
    fn test_nested_operands_are_parenthesized() {
        let expr = IrExpr::binary(
            BinOp::Mul,
            IrExpr::binary(BinOp::Add, id("a"), id("b")),
            id("c"),
        );
        assert_eq!(render(&expr), "(a + b) * c");

        let expr = IrExpr::binary(
            BinOp::Sub,
            id("a"),
            IrExpr::binary(BinOp::Sub, id("b"), id("c")),
        );
        assert_eq!(render(&expr), "a - (b - c)");
    }

    #[test]
    fn test_same_operator_chain_stays_flat() {
        let expr = IrExpr::binary(
            BinOp::Shl,
            IrExpr::binary(BinOp::Shl, id("std::cout"), id("x")),
            id("std::endl"),
        );
        assert_eq!(render(&expr), "std::cout << x << std::endl");
    }

    #[test]
    fn test_unary_and_calls() {
        let neg = IrExpr::Unary {
            op: UnOp::Neg,
            operand: Box::new(IrExpr::Unary {
                op: UnOp::Neg,
                operand: Box::new(id("x")),
            }),
        };
        assert_eq!(render(&neg), "-(-x)");

        let negate = |lit: IrLiteral| IrExpr::Unary {
            op: UnOp::Neg,
            operand: Box::new(IrExpr::Literal(lit)),
        };
        assert_eq!(render(&negate(IrLiteral::Int(-3))), "-(-3)");
        assert_eq!(render(&negate(IrLiteral::Float(-2.5))), "-(-2.5)");
        assert_eq!(render(&negate(IrLiteral::Int(3))), "-3");

        let call = IrExpr::Call {
            callee: "f".to_string(),
            args: vec![IrExpr::int(1), IrExpr::binary(BinOp::Add, id("a"), id("b"))],
        };
        assert_eq!(render(&call), "f(1, a + b)");
    }

    #[test]
    fn test_compound_assignment() {
        let expr = IrExpr::Assignment {
            target: "n".to_string(),
            op: Some(BinOp::Shl),
            value: Box::new(IrExpr::int(2)),
        };
        assert_eq!(render(&expr), "n <<= 2");
    }
}

//! Function definition lowering.

use super::core::IrBuilder;
use super::scope::type_from_annotation;
use crate::error::{Result, TranspileError};
use crate::ir::types::*;
use crate::syntax::{Arguments, Constant, Expr, FunctionDef, Stmt};
use tracing::trace;

impl IrBuilder {
    /// Lower a `def` into an optional docstring comment followed by the
    /// function itself.
    pub(super) fn lower_function(
        &mut self,
        def: &FunctionDef,
        out: &mut Vec<IrStmt>,
    ) -> Result<()> {
        if !self.at_module_level() {
            return Err(TranspileError::unsupported("nested_function"));
        }
        if !def.decorator_list.is_empty() {
            return Err(TranspileError::unsupported("decorator"));
        }
        check_parameter_shape(&def.args)?;
        self.check_identifier(&def.name)?;

        trace!(name = %def.name, params = def.args.args.len(), "lowering function");

        let (doc, body) = split_docstring(&def.body);
        let (params, body) = self.in_function_scope(|this| {
            let params = def
                .args
                .args
                .iter()
                .map(|arg| this.bind_parameter(arg))
                .collect::<Result<Vec<_>>>()?;
            let body = this.lower_body(body)?;
            Ok((params, body))
        })?;
        let return_type = self.resolve_return_type(def)?;

        if let Some(text) = doc {
            out.push(IrStmt::Comment {
                text: text.to_string(),
            });
        }
        out.push(IrStmt::Function(IrFunction {
            name: def.name.clone(),
            return_type,
            params,
            body: IrBlock::new(body),
        }));
        Ok(())
    }

    /// Annotation, else `None` for functions that never return a value,
    /// `int` for `main`, else inferred.
    fn resolve_return_type(&self, def: &FunctionDef) -> Result<IrType> {
        if let Some(annotation) = &def.returns {
            return type_from_annotation(annotation);
        }
        if def.name == "main" {
            return Ok(IrType::named("int"));
        }
        if !returns_value(&def.body) {
            return Ok(IrType::named("None"));
        }
        if self.options.strict_type_inference {
            return Err(TranspileError::TypeInferenceFailure(def.name.clone()));
        }
        Ok(IrType::Inferred)
    }
}

/// Only plain positional parameters without defaults are translated.
fn check_parameter_shape(args: &Arguments) -> Result<()> {
    if !args.posonlyargs.is_empty() {
        return Err(TranspileError::unsupported("positional_only_parameter"));
    }
    if args.vararg.is_some() {
        return Err(TranspileError::unsupported("variadic_parameter"));
    }
    if !args.kwonlyargs.is_empty() {
        return Err(TranspileError::unsupported("keyword_only_parameter"));
    }
    if args.kwarg.is_some() {
        return Err(TranspileError::unsupported("variadic_keyword_parameter"));
    }
    if !args.defaults.is_empty() {
        return Err(TranspileError::unsupported("default_parameter"));
    }
    Ok(())
}

/// Whether any `return` in `body` (outside nested definitions) carries a value.
fn returns_value(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match stmt {
        Stmt::Return { value } => value.is_some(),
        Stmt::If { body, orelse, .. }
        | Stmt::While { body, orelse, .. }
        | Stmt::For { body, orelse, .. } => returns_value(body) || returns_value(orelse),
        _ => false,
    })
}

/// Split a leading string-literal statement off `body`.
pub(super) fn split_docstring(body: &[Stmt]) -> (Option<&str>, &[Stmt]) {
    match body.split_first() {
        Some((
            Stmt::Expr {
                value:
                    Expr::Constant {
                        value: Constant::Str(text),
                    },
            },
            rest,
        )) => (Some(text.as_str()), rest),
        _ => (None, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_value_looks_into_blocks() {
        let body = vec![Stmt::If {
            test: Expr::name("c"),
            body: vec![Stmt::Return {
                value: Some(Expr::int(1)),
            }],
            orelse: vec![],
        }];
        assert!(returns_value(&body));
        assert!(!returns_value(&[Stmt::Return { value: None }]));
        assert!(!returns_value(&[Stmt::Pass]));
    }

    #[test]
    fn docstring_only_when_first() {
        let body = vec![Stmt::expr(Expr::str("Doc.")), Stmt::Pass];
        let (doc, rest) = split_docstring(&body);
        assert_eq!(doc, Some("Doc."));
        assert_eq!(rest, &[Stmt::Pass]);

        let body = vec![Stmt::Pass, Stmt::expr(Expr::str("late"))];
        let (doc, rest) = split_docstring(&body);
        assert_eq!(doc, None);
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn parameter_shapes() {
        let mut args = Arguments::default();
        args.vararg = Some(crate::syntax::Arg::new("rest", None));
        assert_eq!(
            check_parameter_shape(&args),
            Err(TranspileError::unsupported("variadic_parameter"))
        );

        let mut args = Arguments::default();
        args.defaults = vec![Expr::int(1)];
        assert_eq!(
            check_parameter_shape(&args),
            Err(TranspileError::unsupported("default_parameter"))
        );
    }
}

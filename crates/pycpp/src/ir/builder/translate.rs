//! Statement and expression translation.
//!
//! Dispatches every source statement to its lowering rule and converts
//! expressions into IR expressions.

use super::core::IrBuilder;
use super::operators::{binary_operator, bool_operator, comparison_operator, unary_operator};
use super::scope::Binding;
use crate::error::{Result, TranspileError};
use crate::ir::types::*;
use crate::syntax::{CmpOperator, Constant, Expr, Keyword, Operator, Stmt};
use heck::ToSnakeCase;
use tracing::trace;

/// Umbrella header standing in for every source import.
pub const UMBRELLA_INCLUDE: &str = "bits/stdc++.h";

const STDOUT: &str = "std::cout";
const ENDL: &str = "std::endl";

impl IrBuilder {
    /// Lower a statement sequence.
    pub(super) fn lower_body(&mut self, stmts: &[Stmt]) -> Result<Vec<IrStmt>> {
        let mut out = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            self.lower_stmt(stmt, &mut out)?;
        }
        Ok(out)
    }

    /// Lower one statement, appending zero or more IR statements to `out`.
    pub(super) fn lower_stmt(&mut self, stmt: &Stmt, out: &mut Vec<IrStmt>) -> Result<()> {
        match stmt {
            Stmt::FunctionDef(def) => return self.lower_function(def, out),

            Stmt::Return { value } => {
                if self.scopes.depth() == 1 {
                    return Err(TranspileError::unsupported("return_outside_function"));
                }
                let value = value.as_ref().map(|v| self.lower_expr(v)).transpose()?;
                out.push(IrStmt::Return { value });
            }

            Stmt::Assign { targets, value } => {
                let [target] = targets.as_slice() else {
                    return Err(TranspileError::unsupported("multiple_assignment"));
                };
                let name = target_name(target)?;
                out.push(self.lower_assignment(name, None, value)?);
            }

            Stmt::AnnAssign {
                target,
                annotation,
                value,
            } => {
                let name = target_name(target)?;
                let Some(value) = value else {
                    return Err(TranspileError::unsupported("annotation_without_value"));
                };
                out.push(self.lower_assignment(name, Some(annotation), value)?);
            }

            Stmt::AugAssign { target, op, value } => {
                out.push(self.lower_aug_assign(target, *op, value)?);
            }

            Stmt::If { test, body, orelse } => {
                if let Some(stmt) = self.lower_if(test, body, orelse)? {
                    out.push(stmt);
                }
            }

            Stmt::While { test, body, orelse } => out.push(self.lower_while(test, body, orelse)?),

            Stmt::For {
                target,
                iter,
                body,
                orelse,
            } => out.push(self.lower_for(target, iter, body, orelse)?),

            Stmt::Import { .. } | Stmt::ImportFrom { .. } => {
                if !self.at_module_level() {
                    return Err(TranspileError::unsupported("nested_import"));
                }
                if !self.include_emitted {
                    self.include_emitted = true;
                    out.push(IrStmt::Include {
                        path: UMBRELLA_INCLUDE.to_string(),
                    });
                }
            }

            Stmt::Expr { value } => out.push(IrStmt::Expr(self.lower_expr(value)?)),

            Stmt::Pass => {}
            Stmt::Break => out.push(IrStmt::Break),
            Stmt::Continue => out.push(IrStmt::Continue),

            Stmt::Other { kind } => return Err(TranspileError::unsupported(kind.to_snake_case())),
        }
        Ok(())
    }

    /// `name = value` or `name: annotation = value`.
    fn lower_assignment(
        &mut self,
        name: &str,
        annotation: Option<&Expr>,
        value: &Expr,
    ) -> Result<IrStmt> {
        self.check_identifier(name)?;
        // The value is evaluated before the name is bound.
        let value = self.lower_expr(value)?;
        match self.resolve_binding(name, annotation)? {
            Binding::New(ty) => {
                trace!(name, ty = %ty, "new binding");
                Ok(IrStmt::Declaration {
                    ty,
                    target: name.to_string(),
                    value,
                })
            }
            Binding::Existing => Ok(IrStmt::Assign {
                target: name.to_string(),
                value,
            }),
        }
    }

    fn lower_aug_assign(&mut self, target: &Expr, op: Operator, value: &Expr) -> Result<IrStmt> {
        let name = target_name(target)?;
        self.check_identifier(name)?;
        if !self.scopes.is_bound_in_current(name) {
            let reason = if self.scopes.lookup(name).is_some() {
                "augmented_assignment_to_outer_name"
            } else {
                "augmented_assignment_to_unbound_name"
            };
            return Err(TranspileError::unsupported(reason));
        }
        let op = binary_operator(op)?;
        Ok(IrStmt::Expr(IrExpr::Assignment {
            target: name.to_string(),
            op: Some(op),
            value: Box::new(self.lower_expr(value)?),
        }))
    }

    /// Convert a source expression into an IR expression.
    pub(super) fn lower_expr(&self, expr: &Expr) -> Result<IrExpr> {
        match expr {
            Expr::Constant { value } => Ok(IrExpr::Literal(lower_constant(value))),

            Expr::Name { id } => {
                self.check_identifier(id)?;
                Ok(IrExpr::Identifier(id.clone()))
            }

            Expr::BinOp { left, op, right } => {
                let op = binary_operator(*op)?;
                Ok(IrExpr::binary(
                    op,
                    self.lower_expr(left)?,
                    self.lower_expr(right)?,
                ))
            }

            Expr::UnaryOp { op, operand } => Ok(IrExpr::Unary {
                op: unary_operator(*op),
                operand: Box::new(self.lower_expr(operand)?),
            }),

            Expr::BoolOp { op, values } => {
                let op = bool_operator(*op);
                let mut values = values.iter();
                let Some(first) = values.next() else {
                    return Err(TranspileError::unsupported("empty_bool_op"));
                };
                values.try_fold(self.lower_expr(first)?, |acc, value| {
                    Ok(IrExpr::binary(op, acc, self.lower_expr(value)?))
                })
            }

            Expr::Compare {
                left,
                ops,
                comparators,
            } => self.lower_compare(left, ops, comparators),

            Expr::Call {
                func,
                args,
                keywords,
            } => self.lower_call(func, args, keywords),

            other => Err(TranspileError::unsupported(other.kind().to_snake_case())),
        }
    }

    /// `a < b < c` becomes `(a < b) && (b < c)`.
    fn lower_compare(
        &self,
        left: &Expr,
        ops: &[CmpOperator],
        comparators: &[Expr],
    ) -> Result<IrExpr> {
        if ops.is_empty() || ops.len() != comparators.len() {
            return Err(TranspileError::unsupported("malformed_compare"));
        }

        let mut lhs = self.lower_expr(left)?;
        let mut chain: Option<IrExpr> = None;
        for (op, comparator) in ops.iter().zip(comparators) {
            let op = comparison_operator(*op)?;
            let rhs = self.lower_expr(comparator)?;
            let pair = IrExpr::binary(op, lhs, rhs.clone());
            chain = Some(match chain {
                Some(acc) => IrExpr::binary(BinOp::And, acc, pair),
                None => pair,
            });
            lhs = rhs;
        }
        chain.ok_or_else(|| TranspileError::unsupported("malformed_compare"))
    }

    fn lower_call(&self, func: &Expr, args: &[Expr], keywords: &[Keyword]) -> Result<IrExpr> {
        if !keywords.is_empty() {
            return Err(TranspileError::unsupported("keyword_argument"));
        }
        if args.iter().any(|arg| matches!(arg, Expr::Starred { .. })) {
            return Err(TranspileError::unsupported("starred_argument"));
        }
        let Expr::Name { id: callee } = func else {
            return Err(TranspileError::unsupported(format!(
                "call_of_{}",
                func.kind().to_snake_case()
            )));
        };

        if callee == "print" {
            return self.lower_print(args);
        }

        self.check_identifier(callee)?;
        let args = args
            .iter()
            .map(|arg| self.lower_expr(arg))
            .collect::<Result<Vec<_>>>()?;
        Ok(IrExpr::Call {
            callee: callee.clone(),
            args,
        })
    }

    /// `print(a, b)` becomes `std::cout << a << " " << b << std::endl`.
    fn lower_print(&self, args: &[Expr]) -> Result<IrExpr> {
        let mut stream = IrExpr::identifier(STDOUT);
        for (idx, arg) in args.iter().enumerate() {
            if idx > 0 {
                stream = IrExpr::binary(
                    BinOp::Shl,
                    stream,
                    IrExpr::Literal(IrLiteral::Str(" ".to_string())),
                );
            }
            stream = IrExpr::binary(BinOp::Shl, stream, self.lower_expr(arg)?);
        }
        Ok(IrExpr::binary(BinOp::Shl, stream, IrExpr::identifier(ENDL)))
    }
}

fn target_name(target: &Expr) -> Result<&str> {
    match target {
        Expr::Name { id } => Ok(id),
        other => Err(TranspileError::unsupported(format!(
            "assignment_to_{}",
            other.kind().to_snake_case()
        ))),
    }
}

fn lower_constant(value: &Constant) -> IrLiteral {
    match value {
        Constant::None => IrLiteral::Null,
        Constant::Bool(b) => IrLiteral::Bool(*b),
        Constant::Int(i) => IrLiteral::Int(*i),
        Constant::Float(f) => IrLiteral::Float(*f),
        Constant::Str(s) => IrLiteral::Str(s.clone()),
    }
}

//! Control flow lowering: `if`, `while` and `for`.
//!
//! `for` loops come out with an unresolved header; the loop pass in
//! `crate::passes` decides between a counted and a range-based loop.

use super::core::IrBuilder;
use crate::error::{Result, TranspileError};
use crate::ir::types::*;
use crate::syntax::{CmpOperator, Constant, Expr, Stmt};
use heck::ToSnakeCase;

impl IrBuilder {
    /// Returns `None` for the module-level `if __name__ == "__main__":` guard,
    /// which has no counterpart in the output.
    pub(super) fn lower_if(
        &mut self,
        test: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
    ) -> Result<Option<IrStmt>> {
        if self.at_module_level() && is_entry_point_guard(test) {
            return Ok(None);
        }

        let cond = self.lower_expr(test)?;
        let then_block = self.lower_nested_block(body)?;
        let else_block = if orelse.is_empty() {
            None
        } else {
            Some(self.lower_nested_block(orelse)?)
        };

        Ok(Some(IrStmt::If {
            cond,
            then_block,
            else_block,
        }))
    }

    pub(super) fn lower_while(
        &mut self,
        test: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
    ) -> Result<IrStmt> {
        if !orelse.is_empty() {
            return Err(TranspileError::unsupported("while_else"));
        }
        let cond = self.lower_expr(test)?;
        let body = self.lower_nested_block(body)?;
        Ok(IrStmt::While { cond, body })
    }

    pub(super) fn lower_for(
        &mut self,
        target: &Expr,
        iter: &Expr,
        body: &[Stmt],
        orelse: &[Stmt],
    ) -> Result<IrStmt> {
        if !orelse.is_empty() {
            return Err(TranspileError::unsupported("for_else"));
        }
        let Expr::Name { id } = target else {
            return Err(TranspileError::unsupported(format!(
                "for_target_{}",
                target.kind().to_snake_case()
            )));
        };
        self.check_identifier(id)?;

        let iterable = self.lower_expr(iter)?;
        // The header declares the variable, and it does not outlive the loop.
        let introduced = self.bind_loop_variable(id);
        let body = self.lower_nested_block(body);
        if introduced {
            self.scopes.unbind(id);
        }
        let body = body?;

        Ok(IrStmt::For {
            header: ForHeader::Unresolved {
                target: id.clone(),
                iterable,
            },
            body,
        })
    }
}

/// `__name__ == "__main__"`, in either operand order.
fn is_entry_point_guard(test: &Expr) -> bool {
    let Expr::Compare {
        left,
        ops,
        comparators,
    } = test
    else {
        return false;
    };
    if ops.as_slice() != [CmpOperator::Eq] || comparators.len() != 1 {
        return false;
    }

    let is_name = |e: &Expr| matches!(e, Expr::Name { id } if id == "__name__");
    let is_main = |e: &Expr| {
        matches!(e, Expr::Constant { value: Constant::Str(s) } if s == "__main__")
    };
    let right = &comparators[0];
    (is_name(left) && is_main(right)) || (is_main(left) && is_name(right))
}

//! IR → IR passes.
//!
//! Each pass is a self-contained sub-module that consumes a translation unit
//! and returns a new one. The top-level [`run_passes`] function runs all
//! passes in order; its output is ready for emission.

use crate::error::Result;
use crate::ir::TranslationUnit;
use tracing::debug;

// ── Passes ───────────────────────────────────────────────────────────────────
pub mod loops;

/// Runs every IR pass in order.
pub fn run_passes(unit: TranslationUnit) -> Result<TranslationUnit> {
    let unit = loops::resolve(unit)?;
    debug!(items = unit.items.len(), "loop headers resolved");
    Ok(unit)
}

// ── run_passes integration tests ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::ir::{ForHeader, IrBlock, IrExpr, IrFunction, IrStmt, IrType, TranslationUnit};

    fn unresolved_loop(target: &str, iterable: IrExpr) -> IrStmt {
        IrStmt::For {
            header: ForHeader::Unresolved {
                target: target.to_string(),
                iterable,
            },
            body: IrBlock::default(),
        }
    }

    #[test]
    fn run_passes_resolves_loops_inside_functions() {
        let unit = TranslationUnit {
            items: vec![IrStmt::Function(IrFunction {
                name: "f".to_string(),
                return_type: IrType::named("None"),
                params: vec![],
                body: IrBlock::new(vec![IrStmt::While {
                    cond: IrExpr::identifier("c"),
                    body: IrBlock::new(vec![unresolved_loop("x", IrExpr::identifier("xs"))]),
                }]),
            })],
        };

        let result = super::run_passes(unit).unwrap();

        let IrStmt::Function(func) = &result.items[0] else {
            panic!("expected function");
        };
        let IrStmt::While { body, .. } = &func.body.statements[0] else {
            panic!("expected while");
        };
        assert_eq!(
            body.statements[0],
            IrStmt::For {
                header: ForHeader::Ranged {
                    var: "x".to_string(),
                    iterable: IrExpr::identifier("xs"),
                },
                body: IrBlock::default(),
            }
        );
    }
}

//! Core IR builder state.
//!
//! This module contains the `IrBuilder` that walks a syntax tree once and
//! produces a fresh [`TranslationUnit`]. The walk interleaves the three
//! lowering concerns in a fixed order for every statement: scope and typing
//! decisions first, then control-flow lowering, then expression codegen.

use super::scope::ScopeStack;
use crate::error::{Result, TranspileError};
use crate::ir::types::*;
use crate::keywords;
use crate::syntax::{Module, Stmt};
use crate::TranspileOptions;
use tracing::trace;

/// IR builder state.
///
/// One builder translates one module; nothing is shared between runs.
pub struct IrBuilder {
    /// Configuration of this run.
    pub(super) options: TranspileOptions,

    /// Name → type bindings, one frame per function body plus the module frame.
    pub(super) scopes: ScopeStack,

    /// Number of enclosing if/while/for bodies at the current position.
    pub(super) block_depth: usize,

    /// Whether the umbrella include has already been emitted.
    pub(super) include_emitted: bool,
}

impl IrBuilder {
    /// Create a builder for one translation run.
    pub fn new(options: &TranspileOptions) -> Self {
        Self {
            options: options.clone(),
            scopes: ScopeStack::new(),
            block_depth: 0,
            include_emitted: false,
        }
    }

    /// Depth of the scope stack (1 = module scope only).
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Lower a whole module into a translation unit.
    pub fn lower_module(&mut self, module: &Module) -> Result<TranslationUnit> {
        let mut items = Vec::new();

        let (doc, body) = super::function::split_docstring(&module.body);
        if let Some(text) = doc {
            items.push(IrStmt::Comment {
                text: text.to_string(),
            });
        }

        for stmt in body {
            trace!(kind = stmt.kind(), "lowering module statement");
            self.lower_stmt(stmt, &mut items)?;
        }

        Ok(TranslationUnit { items })
    }

    /// True while lowering statements directly in the module body.
    pub(super) fn at_module_level(&self) -> bool {
        self.scopes.depth() == 1 && self.block_depth == 0
    }

    /// Reject identifiers that are keywords of the configured dialect.
    pub(super) fn check_identifier(&self, name: &str) -> Result<()> {
        let dialect = self.options.dialect;
        if keywords::is_reserved(name, dialect) {
            return Err(TranspileError::ReservedIdentifierCollision {
                name: name.to_string(),
                dialect,
            });
        }
        Ok(())
    }

    /// Run `f` inside a fresh function scope frame.
    ///
    /// The frame is popped whether or not `f` succeeds, so the stack always
    /// returns to its previous depth.
    pub(super) fn in_function_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    /// Lower the body of an if/while/for statement.
    pub(super) fn lower_nested_block(&mut self, stmts: &[Stmt]) -> Result<IrBlock> {
        self.block_depth += 1;
        let result = self.lower_body(stmts);
        self.block_depth -= 1;
        Ok(IrBlock::new(result?))
    }
}

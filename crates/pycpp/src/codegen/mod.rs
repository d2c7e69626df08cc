//! Code generation: emits C++ source text from IR.
//!
//! # Overview
//!
//! The generator walks a resolved [`TranslationUnit`] and writes C++ into a
//! single output buffer. Structure (indentation, braces, statement
//! terminators, blank lines) lives here; the spelling of types, literals
//! and operators is delegated to a [`Backend`].
//!
//! ```text
//!   TranslationUnit ──► generate_unit() ──► per item: statement::emit_stmt()
//!                                                    └─► expression::write_expr()
//! ```
//!
//! # Sub-modules
//!
//! - **`statement`**: one rule per statement kind (functions, loops, ifs, ...)
//! - **`expression`**: expressions, with parentheses only around nested
//!   operands that need them
//!
//! # Layout
//!
//! - Four spaces per indentation level.
//! - A blank line separates top-level functions from what precedes them,
//!   except when the preceding item is the function's own comment.
//! - The output ends with a newline.
//!
//! Delimiter pairs are written through [`CodeGenerator::delimited`] and
//! [`CodeGenerator::block`], which emit the closing text even when the
//! enclosed emission fails. Output is only returned on success, so a failure
//! never surfaces half-written text.

mod expression;
mod statement;

use crate::backend::Backend;
use crate::error::Result;
use crate::ir::*;
use tracing::trace;

const INDENT: &str = "    ";

/// Writes C++ text for IR nodes into an owned buffer.
pub struct CodeGenerator<'a, B: Backend> {
    pub(super) backend: &'a B,
    out: String,
    depth: usize,
}

impl<'a, B: Backend> CodeGenerator<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        CodeGenerator {
            backend,
            out: String::new(),
            depth: 0,
        }
    }

    /// Consume the generator and return the emitted text.
    pub fn finish(self) -> String {
        self.out
    }

    pub(super) fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Start a new line at the current indentation.
    pub(super) fn fill(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    /// Write `open`, run `f`, then write `close` regardless of the outcome.
    pub(super) fn delimited<T>(
        &mut self,
        open: &str,
        close: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.write(open);
        let result = f(self);
        self.write(close);
        result
    }

    /// ` {`, an indented body, then `}` on its own line (no trailing newline).
    pub(super) fn block(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.write(" {\n");
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.fill();
        self.write("}");
        result
    }

    /// One full statement line terminated by `;`.
    pub(super) fn statement(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.fill();
        let result = f(self);
        self.write(";\n");
        result
    }

    /// Emit a whole translation unit.
    pub fn emit_unit(&mut self, unit: &TranslationUnit) -> Result<()> {
        let mut previous: Option<&IrStmt> = None;
        for (idx, item) in unit.items.iter().enumerate() {
            let next = unit.items.get(idx + 1);
            if previous.is_some() && needs_separator(previous, item, next) {
                self.write("\n");
            }
            trace!(kind = item.kind(), "emitting item");
            self.emit_stmt(item)?;
            previous = Some(item);
        }
        Ok(())
    }
}

/// Blank line before a top-level function, or before the comment that
/// documents it.
fn needs_separator(previous: Option<&IrStmt>, item: &IrStmt, next: Option<&IrStmt>) -> bool {
    match item {
        IrStmt::Function(_) => !matches!(previous, Some(IrStmt::Comment { .. })),
        IrStmt::Comment { .. } => matches!(next, Some(IrStmt::Function(_))),
        _ => false,
    }
}

/// Render a resolved translation unit as C++ source text.
pub fn generate_unit<B: Backend>(backend: &B, unit: &TranslationUnit) -> Result<String> {
    let mut generator = CodeGenerator::new(backend);
    generator.emit_unit(unit)?;
    let mut code = generator.finish();
    if !code.ends_with('\n') {
        code.push('\n');
    }
    Ok(code)
}

//! pycpp: Python to C++ transpiler.
//!
//! This crate provides the translation pipeline that converts a Python
//! syntax tree into C++ source text through an explicit intermediate
//! representation:
//!
//! ```text
//! syntax::Module ─► ir::builder ─► passes ─► codegen + backend ─► String
//! ```
//!
//! The core ([`transpile`]) takes an already parsed [`syntax::Module`] and
//! returns typed [`TranspileError`]s. [`transpile_json`] is the adapter for
//! front ends that hand over the tree as JSON.

pub mod backend;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod keywords;
pub mod parser;
pub mod passes;
pub mod syntax;

// Re-export key types for convenience
pub use error::TranspileError;
pub use keywords::Dialect;

use anyhow::Context;
use backend::CppBackend;
use codegen::generate_unit;
use ir::build_translation_unit;
use passes::run_passes;
use tracing::debug;

/// Configuration options for transpilation
#[derive(Debug, Clone, Default)]
pub struct TranspileOptions {
    /// Fail instead of emitting `auto` when a new binding, parameter or
    /// return type has no annotation.
    pub strict_type_inference: bool,
    /// Keyword set that source identifiers must not collide with.
    pub dialect: Dialect,
}

/// Transpile a parsed Python module to C++ source code.
///
/// This is the main entry point for the translation pipeline. Every stage
/// produces a new tree; the first error stops the run.
///
/// # Example
/// ```
/// use pycpp::syntax::{Expr, Module, Stmt};
/// use pycpp::{transpile, TranspileOptions};
///
/// let module = Module {
///     body: vec![Stmt::assign("y", Expr::int(5))],
/// };
/// let code = transpile(&module, &TranspileOptions::default()).unwrap();
/// assert_eq!(code, "auto y = 5;\n");
/// ```
pub fn transpile(
    module: &syntax::Module,
    options: &TranspileOptions,
) -> Result<String, TranspileError> {
    debug!(
        statements = module.body.len(),
        strict = options.strict_type_inference,
        dialect = %options.dialect,
        "building IR"
    );
    let unit = build_translation_unit(module, options)?;

    debug!(items = unit.items.len(), "running IR passes");
    let unit = run_passes(unit)?;

    let backend = CppBackend::new();
    let code = generate_unit(&backend, &unit)?;
    debug!(bytes = code.len(), "emitted C++");
    Ok(code)
}

/// Transpile a JSON-encoded Python syntax tree to C++ source code.
///
/// Translation errors keep their type; recover them with
/// `err.downcast_ref::<TranspileError>()`.
pub fn transpile_json(source: &str, options: &TranspileOptions) -> anyhow::Result<String> {
    let module = parser::parse_module_json(source).context("failed to read syntax tree")?;
    let code = transpile(&module, options).context("failed to transpile module")?;
    Ok(code)
}

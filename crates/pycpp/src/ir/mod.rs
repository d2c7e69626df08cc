//! Intermediate Representation (IR) for Python → C++ transpilation.
//!
//! The IR is a closed set of target-oriented node kinds sitting between the
//! Python syntax tree and generated C++ text. The builder lowers a syntax
//! tree into a [`TranslationUnit`]; IR passes rewrite it into a new unit;
//! codegen renders it.

mod types;
pub use types::*;

pub mod builder;
pub use builder::build_translation_unit;

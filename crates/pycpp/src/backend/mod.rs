//! Code generation backends.
//!
//! The Backend trait holds the target-specific vocabulary: how types,
//! literals and operators are spelled. The code generator owns structure
//! (blocks, statements, layout) and asks the backend for the leaves.

mod cpp;
pub use cpp::CppBackend;

use crate::error::Result;
use crate::ir::*;

/// Code generation backend trait.
pub trait Backend {
    /// Target spelling of an IR type. Fails for names without a mapping.
    fn type_name(&self, ty: &IrType) -> Result<String>;

    /// Target spelling of a function return type. Also accepts the
    /// "no value" type, which `type_name` rejects.
    fn return_type_name(&self, ty: &IrType) -> Result<String>;

    /// Target spelling of a literal.
    fn literal(&self, lit: &IrLiteral) -> String;

    /// Target token for a binary operator.
    fn binary_operator(&self, op: BinOp) -> &'static str;

    /// Target token for a unary operator.
    fn unary_operator(&self, op: UnOp) -> &'static str;
}

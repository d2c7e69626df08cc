//! Error kinds raised by the translation pipeline.
//!
//! Every pass returns the first violation it meets; nothing is recovered or
//! retried inside the core. Adapters (the JSON reader and the CLI) wrap these
//! in `anyhow` with context, and callers can get the typed kind back with
//! `anyhow::Error::downcast_ref::<TranspileError>()`.

use crate::keywords::Dialect;
use thiserror::Error;

/// A fatal translation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    /// A source or IR construct has no lowering or emission rule
    /// (unsupported operator, variadic parameters, unmapped type name, ...).
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// A source identifier collides with a keyword of the target language.
    #[error("identifier `{name}` collides with a {dialect} dialect keyword")]
    ReservedIdentifierCollision { name: String, dialect: Dialect },

    /// Strict mode requires an annotation that is absent.
    #[error("type of `{0}` cannot be inferred without an annotation")]
    TypeInferenceFailure(String),

    /// An IR node reached the emitter in a state it has no rule for.
    /// This is a pipeline bug, not a property of the input program.
    #[error("internal error: no emission rule for {0}")]
    EmissionContractViolation(String),
}

impl TranspileError {
    pub(crate) fn unsupported(construct: impl Into<String>) -> Self {
        TranspileError::UnsupportedConstruct(construct.into())
    }

    pub(crate) fn contract(node_kind: impl Into<String>) -> Self {
        TranspileError::EmissionContractViolation(node_kind.into())
    }
}

/// Result alias used by every pipeline stage.
pub type Result<T> = std::result::Result<T, TranspileError>;

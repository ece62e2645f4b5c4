//! RDF transform error types

use thiserror::Error;

/// Errors raised while loading or applying an RDF transform
#[derive(Debug, Error)]
pub enum TransformError {
    /// Malformed IRI that could not be resolved by any strategy
    #[error("Malformed IRI [{iri}]: {message}")]
    IriParse { iri: String, message: String },

    /// Error parsing a transform document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Missing required field in a transform document
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    /// Invalid field value
    #[error("Invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },

    /// Declared but unimplemented feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Triple sink failure; fatal for the current batch
    #[error("Sink error: {0}")]
    Sink(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransformError {
    pub(crate) fn iri(iri: impl Into<String>, message: impl ToString) -> Self {
        TransformError::IriParse {
            iri: iri.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for RDF transform operations
pub type TransformResult<T> = Result<T, TransformError>;

/// Cell expression evaluation failure reported by the host
///
/// Routine while a user is still typing an expression; the node model turns
/// it into "no terms for this row".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Expression error: {0}")]
pub struct EvalError(pub String);

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError(message.into())
    }
}

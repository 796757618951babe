#![forbid(unsafe_code)]

use thiserror::Error;

/// Failures while resolving a model or producing a continuation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The requested model name is not in the supported set.
    #[error("unknown model id: {0}")]
    UnknownModel(String),
    /// The backend failed mid-generation.
    #[error("generation failed: {0}")]
    Failed(String),
}

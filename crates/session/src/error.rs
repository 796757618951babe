#![forbid(unsafe_code)]

use classify::ArtifactError;
use generate::GenerateError;
use thiserror::Error;

/// Everything that can fail during a generation-and-scoring cycle.
/// The presentation layer maps these onto user-visible messages.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The classifier artifact could not be loaded.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    /// The generator could not be resolved or failed mid-batch.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

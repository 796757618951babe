#![forbid(unsafe_code)]

use thiserror::Error;

/// Failures while writing or reading the classifier artifact file.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// File could not be read or written.
    #[error("artifact io error at {path}: {source}")]
    Io {
        /// Path the operation targeted.
        path: String,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },
    /// Bincode could not encode or decode the pipeline.
    #[error("artifact codec error: {0}")]
    Codec(#[from] bincode::Error),
}

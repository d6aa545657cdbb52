//! Pipeline-level errors.

use std::path::PathBuf;

use super::StorageError;

/// Errors surfaced by the analysis pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("cannot write artifact {path}: {source}")]
    Emit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis cancelled")]
    Cancelled,
}

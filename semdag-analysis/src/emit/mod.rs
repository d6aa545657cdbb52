//! Artifact emitters: DAGitty scripts, the evidence dossier, and the
//! metrics / configuration records.

pub mod dagitty;
pub mod dossier;
pub mod metrics;

use std::path::Path;

use semdag_core::errors::AnalysisError;

/// Write an artifact, mapping failures to `AnalysisError::Emit`.
/// Artifact write failures are fatal.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    std::fs::write(path, contents).map_err(|source| AnalysisError::Emit {
        path: path.to_path_buf(),
        source,
    })
}

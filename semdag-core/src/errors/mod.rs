//! Error taxonomy for configuration, storage, and analysis failures.
//!
//! Evidence absence is deliberately not an error: it is a
//! `RunOutcome::EvidenceAbsent` value returned by the pipeline.

mod analysis_error;
mod config_error;
mod storage_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

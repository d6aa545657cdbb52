//! # semdag-core
//!
//! Foundation crate for the semdag causal-graph miner.
//! Defines the configuration model, error taxonomy, domain types,
//! the node-name normalizer, and the stage-timing recorder.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod naming;
pub mod timing;
pub mod types;

// Re-export the most commonly used items at the crate root.
pub use config::{AnalysisConfig, FrontierMode};
pub use errors::{AnalysisError, ConfigError, StorageError};
pub use naming::clean_node_name;
pub use timing::TimingRecorder;
pub use types::{Assertion, SentenceRef, EXCLUDED_SEMTYPES};

/// Hash map with the FxHash hasher, used for hot lookup tables.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;
/// Hash set with the FxHash hasher.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;

//! # semdag-analysis
//!
//! The mining pipeline: k-hop expansion over the evidence store,
//! node consolidation, directed-graph construction, Markov-blanket
//! computation, and artifact emission.

pub mod cancel;
pub mod consolidation;
pub mod emit;
pub mod expander;
pub mod graph;
pub mod markov;
pub mod pipeline;

pub use cancel::Cancellation;
pub use consolidation::ConsolidationMap;
pub use graph::CausalGraph;
pub use pipeline::{run, RunOutcome, RunReport};

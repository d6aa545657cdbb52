//! # semdag-storage
//!
//! Read-only SQLite adapter for the causal predication store and the
//! evidence sentence store. Nothing outside this crate touches SQL.
//! All set-valued filters bind through the `rarray` table-valued function,
//! never through spliced literals.

pub mod connection;
pub mod queries;
pub mod store;
pub mod test_support;

pub use connection::TableNames;
pub use store::{EvidenceStore, HopSeed};

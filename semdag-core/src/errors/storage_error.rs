//! Storage-layer errors for the evidence store.

/// Errors that can occur in the evidence-store adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("cannot open evidence store {path}: {message}")]
    Connect { path: String, message: String },

    #[error("query failed in {operation}: {message}")]
    Query { operation: String, message: String },

    #[error("malformed row: {message}")]
    InvalidRow { message: String },
}

impl StorageError {
    /// Wrap a database error with the logical operation it occurred in
    /// (hop id, probe, or fetch name).
    pub fn query(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Query {
            operation: operation.into(),
            message: err.to_string(),
        }
    }
}

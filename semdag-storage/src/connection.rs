//! Connection bootstrap and table naming.

use std::path::Path;

use rusqlite::Connection;
use semdag_core::errors::StorageError;

/// Environment variables overriding where the two stores live.
pub const ENV_PREDICATION_SCHEMA: &str = "DB_PREDICATION_SCHEMA";
pub const ENV_PREDICATION_TABLE: &str = "DB_PREDICATION_TABLE";
pub const ENV_SENTENCE_SCHEMA: &str = "DB_SENTENCE_SCHEMA";
pub const ENV_SENTENCE_TABLE: &str = "DB_SENTENCE_TABLE";

/// Fully qualified names of the two tables the adapter reads.
#[derive(Debug, Clone)]
pub struct TableNames {
    pub predication: String,
    pub sentence: String,
}

impl TableNames {
    /// Resolve table names from the process environment, defaulting to
    /// `main.predication` and `main.sentence`.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve table names through an arbitrary variable lookup.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let qualified = |schema_key: &str, table_key: &str, default_table: &str| {
            let schema = lookup(schema_key).unwrap_or_else(|| "main".to_string());
            let table = lookup(table_key).unwrap_or_else(|| default_table.to_string());
            format!("\"{schema}\".\"{table}\"")
        };
        Self {
            predication: qualified(ENV_PREDICATION_SCHEMA, ENV_PREDICATION_TABLE, "predication"),
            sentence: qualified(ENV_SENTENCE_SCHEMA, ENV_SENTENCE_TABLE, "sentence"),
        }
    }

    /// The compiled-in defaults, independent of the environment.
    pub fn defaults() -> Self {
        Self::resolve(|_| None)
    }
}

/// Open a database file and register the `rarray` module used for
/// set-valued parameter binding.
pub fn open_connection(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path).map_err(|e| StorageError::Connect {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    prepare_connection(conn, &path.display().to_string())
}

/// In-memory variant, used by tests and fixtures.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().map_err(|e| StorageError::Connect {
        path: ":memory:".to_string(),
        message: e.to_string(),
    })?;
    prepare_connection(conn, ":memory:")
}

fn prepare_connection(conn: Connection, path: &str) -> Result<Connection, StorageError> {
    rusqlite::vtab::array::load_module(&conn).map_err(|e| StorageError::Connect {
        path: path.to_string(),
        message: format!("cannot load array module: {e}"),
    })?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_qualify_with_main_schema() {
        let names = TableNames::defaults();
        assert_eq!(names.predication, "\"main\".\"predication\"");
        assert_eq!(names.sentence, "\"main\".\"sentence\"");
    }

    #[test]
    fn resolve_honors_overrides() {
        let names = TableNames::resolve(|key| match key {
            ENV_PREDICATION_SCHEMA => Some("semmed".to_string()),
            ENV_PREDICATION_TABLE => Some("causalpredication".to_string()),
            ENV_SENTENCE_TABLE => Some("causalsentence".to_string()),
            _ => None,
        });
        assert_eq!(names.predication, "\"semmed\".\"causalpredication\"");
        assert_eq!(names.sentence, "\"main\".\"causalsentence\"");
    }
}

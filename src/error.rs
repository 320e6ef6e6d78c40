//! Error types for sqlite-utils

use thiserror::Error;

/// Result type alias for sqlite-utils operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by statement assembly and execution
///
/// Driver failures are split by the stage they happened in so callers can
/// tell a malformed statement apart from a constraint violation at run time.
#[derive(Debug, Error)]
pub enum Error {
    /// Opening or creating the database failed
    #[error("Failed to open database '{path}': {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The driver rejected the SQL text while preparing it
    #[error("Failed to prepare statement `{sql}`: {source}")]
    Prepare {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The statement was prepared but failed while binding or running
    #[error("Failed to execute statement `{sql}`: {source}")]
    Execute {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A caller-supplied row handler failed
    #[error("Row handler failed on row {row}: {source}")]
    RowHandler {
        row: usize,
        #[source]
        source: anyhow::Error,
    },

    /// SELECT/DELETE was given a criteria object with no clauses
    #[error("Criteria for `{operation}` on table '{table}' has no clauses")]
    EmptyCriteria {
        operation: &'static str,
        table: String,
    },

    /// INSERT/UPDATE/CREATE TABLE was given no columns
    #[error("No columns given for `{operation}` on table '{table}'")]
    EmptyValues {
        operation: &'static str,
        table: String,
    },

    /// A literal could not be parsed into a supported value kind
    #[error("Invalid value '{input}': {reason}")]
    InvalidValue { input: String, reason: String },
}

impl Error {
    pub(crate) fn invalid_value(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Return the underlying driver error, if the failure came from SQLite
    pub fn sqlite_error(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Connection { source, .. }
            | Self::Prepare { source, .. }
            | Self::Execute { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_message() {
        let err = Error::EmptyCriteria {
            operation: "DELETE",
            table: "warehouses".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Criteria for `DELETE` on table 'warehouses' has no clauses"
        );
        assert!(err.sqlite_error().is_none());
    }

    #[test]
    fn test_sqlite_error_is_exposed() {
        let err = Error::Execute {
            sql: "INSERT INTO t(a) VALUES(?);".to_string(),
            source: rusqlite::Error::QueryReturnedNoRows,
        };
        assert!(matches!(
            err.sqlite_error(),
            Some(rusqlite::Error::QueryReturnedNoRows)
        ));
    }
}

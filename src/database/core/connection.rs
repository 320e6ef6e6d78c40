//! Database connection management
//!
//! This module provides the connection wrapper that every statement in
//! sqlite-utils runs against.

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::database::query::Executor;
use crate::error::{Error, Result};

/// Core database connection wrapper
///
/// `DatabaseConn` is a thin wrapper around a SQLite connection. It opens an
/// existing database file or creates a new one, and is otherwise a plain
/// handle: no pooling, no reconnection.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Connect to an existing database or create a new one
    ///
    /// If the path is `None`, an in-memory database is created.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(p) => Connection::open(p).map_err(|e| {
                warn!(path = p, error = ?e, "failed to open database: {}", e);
                Error::Connection {
                    path: p.to_string(),
                    source: e,
                }
            })?,
            None => Connection::open_in_memory().map_err(|e| {
                warn!(error = ?e, "failed to create in-memory database: {}", e);
                Error::Connection {
                    path: ":memory:".to_string(),
                    source: e,
                }
            })?,
        };

        info!(
            "opened {} with SQLite {}",
            path.unwrap_or(":memory:"),
            rusqlite::version()
        );
        Ok(DatabaseConn { conn })
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> Result<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None)
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Statement executor bound to this connection
    pub fn executor(&self) -> Executor<'_> {
        Executor::new(&self.conn)
    }

    /// Execute a SQL statement without parameters
    pub fn execute(&self, sql: &str) -> Result<usize> {
        debug!("{}", sql);
        self.conn.execute(sql, []).map_err(|e| Error::Execute {
            sql: sql.to_string(),
            source: e,
        })
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        const SQL: &str = "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1";
        let count: i32 = self
            .conn
            .query_row(SQL, [table_name], |row| row.get(0))
            .map_err(|e| Error::Execute {
                sql: SQL.to_string(),
                source: e,
            })?;
        Ok(count > 0)
    }

    /// Get the row count for a table
    pub fn table_count(&self, table_name: &str) -> Result<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let count: u64 = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(|e| Error::Execute {
                sql: query.clone(),
                source: e,
            })?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = DatabaseConn::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.db");
        assert!(!path.exists());

        let db = DatabaseConn::open_path(path.to_str().unwrap()).unwrap();
        db.execute("CREATE TABLE t (id INTEGER PRIMARY KEY)").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tests.db");
        let result = DatabaseConn::open_path(path.to_str().unwrap());
        assert!(matches!(result, Err(Error::Connection { .. })));
    }

    #[test]
    fn test_table_exists() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE test_table (id INTEGER PRIMARY KEY)")
            .unwrap();

        assert!(db.table_exists("test_table").unwrap());
        assert!(!db.table_exists("nonexistent_table").unwrap());
    }

    #[test]
    fn test_table_count() {
        let db = DatabaseConn::open_in_memory().unwrap();
        db.execute("CREATE TABLE test_table (id INTEGER PRIMARY KEY)")
            .unwrap();
        db.execute("INSERT INTO test_table (id) VALUES (1), (2), (3)")
            .unwrap();

        assert_eq!(db.table_count("test_table").unwrap(), 3);
    }
}

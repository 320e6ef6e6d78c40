//! Database module
//!
//! This module provides all database functionality for sqlite-utils, organized into:
//!
//! - **core**: connection wrapper and the bindable value model
//! - **query**: predicate builder, SQL assembly and statement execution
//!
//! # Architecture
//!
//! ```text
//! database/
//! ├── core/           # Foundation
//! │   ├── connection  # SQLite DatabaseConn wrapper (connect or create)
//! │   └── value       # SqlValue and the ordered column maps
//! │
//! └── query/          # Statements
//!     ├── criteria    # QueryCriteria fluent WHERE builder
//!     ├── statement   # CREATE/INSERT/UPDATE/SELECT/DELETE rendering
//!     └── executor    # prepare, bind, execute, stream rows
//! ```
//!
//! # Usage
//!
//! ```rust
//! use sqlite_utils::database::{ColumnTypes, ColumnValues, DatabaseConn, QueryCriteria};
//!
//! let db = DatabaseConn::open_in_memory()?;
//! let exec = db.executor();
//!
//! let mut columns = ColumnTypes::new();
//! columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
//! columns.insert("capacity".to_string(), "real".to_string());
//! exec.create_new_table("warehouses", &columns)?;
//!
//! let mut values = ColumnValues::new();
//! values.insert("capacity".to_string(), 4000.into());
//! exec.insert("warehouses", &values)?;
//!
//! let criteria = QueryCriteria::new().and_greater_than("capacity", 3600);
//! let rows = exec.select("warehouses", &["id"], &criteria, |row| {
//!     let _id: i64 = row.get("id")?;
//!     Ok(())
//! })?;
//! assert_eq!(rows, 1);
//! # Ok::<(), sqlite_utils::Error>(())
//! ```

pub mod core;
pub mod query;

pub use self::core::{ColumnTypes, ColumnValues, DatabaseConn, SqlValue, DATE_FORMAT};
pub use self::query::{
    statement, Combinator, Executor, PredicateOperator, QueryCriteria, RenderedStatement,
    RowErrorPolicy,
};

/// Ensure the directory holding a database file exists
pub fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    match std::path::Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create directory '{}': {}", dir.display(), e)),
        _ => Ok(()),
    }
}

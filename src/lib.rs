#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! sqlite-utils - statement assembly over SQLite
//!
//! sqlite-utils builds `CREATE TABLE`, `INSERT`, `UPDATE`, `SELECT` and
//! `DELETE` statements from ordered column maps and a fluent predicate
//! builder, binds every value positionally, and streams result rows to a
//! caller-supplied handler. It can be used as both a command-line
//! application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `display` | Table formatting for query output | `tabled` |
//! | `cli` | Command-line binary | `clap`, `tracing-subscriber` |
//!
//! # Architecture
//!
//! - **[`database`]**: connection wrapper, value model, predicate builder,
//!   statement assembly and execution
//! - **[`output`]**: rendering result rows as tables, JSON or PSV
//! - **[`config`]**: configuration management
//!
//! # Quick Start
//!
//! ```rust
//! use sqlite_utils::{ColumnTypes, ColumnValues, DatabaseConn, QueryCriteria};
//!
//! let db = DatabaseConn::open_in_memory()?;
//! let exec = db.executor();
//!
//! let mut columns = ColumnTypes::new();
//! columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
//! columns.insert("name".to_string(), "text NOT NULL".to_string());
//! columns.insert("capacity".to_string(), "real".to_string());
//! exec.create_new_table("warehouses", &columns)?;
//!
//! for (name, capacity) in [("Raw Materials", 3000), ("Finished Goods", 5000)] {
//!     let mut values = ColumnValues::new();
//!     values.insert("name".to_string(), name.into());
//!     values.insert("capacity".to_string(), capacity.into());
//!     exec.insert("warehouses", &values)?;
//! }
//!
//! let criteria = QueryCriteria::new().and_greater_than("capacity", 3600);
//! let mut names = Vec::new();
//! exec.select("warehouses", &["name"], &criteria, |row| {
//!     names.push(row.get::<_, String>("name")?);
//!     Ok(())
//! })?;
//! assert_eq!(names, vec!["Finished Goods".to_string()]);
//! # Ok::<(), sqlite_utils::Error>(())
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod output;

pub use config::SqliteUtilsConfig;
pub use error::{Error, Result};

pub use database::{
    ColumnTypes, ColumnValues, Combinator, DatabaseConn, Executor, PredicateOperator,
    QueryCriteria, RenderedStatement, RowErrorPolicy, SqlValue,
};

pub use output::{OutputFormat, RowRecord};

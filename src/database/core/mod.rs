//! Core database infrastructure
//!
//! This module provides the foundational database components:
//! - `DatabaseConn`: SQLite connection wrapper (connect or create)
//! - `SqlValue`: the closed set of scalar values that can be bound

mod connection;
mod value;

pub use connection::DatabaseConn;
pub use value::{ColumnTypes, ColumnValues, SqlValue, DATE_FORMAT};

//! SQL assembly for table creation and row CRUD
//!
//! Each function here is pure: it turns a table name plus column maps and/or
//! a [`QueryCriteria`] into a [`RenderedStatement`] without touching the
//! database. Columns always appear in ascending name order, which is also the
//! order their values are bound in.

use tracing::warn;

use crate::database::core::{ColumnTypes, ColumnValues, SqlValue};
use crate::database::query::QueryCriteria;
use crate::error::{Error, Result};

/// SQL text with `?` placeholders and the values to bind to them, in order
///
/// The i-th parameter is bound at position i + 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement<'a> {
    pub sql: String,
    pub params: Vec<&'a SqlValue>,
}

impl<'a> RenderedStatement<'a> {
    /// Number of `?` placeholders in the SQL text, ignoring quoted literals
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        let mut quote: Option<char> = None;
        for c in self.sql.chars() {
            match (quote, c) {
                (None, '\'' | '"') => quote = Some(c),
                (Some(q), _) if c == q => quote = None,
                (None, '?') => count += 1,
                _ => {}
            }
        }
        count
    }
}

fn join_columns<'k>(columns: impl Iterator<Item = &'k String>, suffix: &str) -> String {
    columns
        .map(|c| format!("{}{}", c, suffix))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE IF NOT EXISTS` with one tab-indented line per column
pub fn create_table<'a>(table: &str, columns: &ColumnTypes) -> Result<RenderedStatement<'a>> {
    if columns.is_empty() {
        return Err(Error::EmptyValues {
            operation: "CREATE TABLE",
            table: table.to_string(),
        });
    }

    let body = columns
        .iter()
        .map(|(name, datatype)| format!("\t{} {}", name, datatype))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(RenderedStatement {
        sql: format!("CREATE TABLE IF NOT EXISTS {} (\n{}\n);", table, body),
        params: Vec::new(),
    })
}

/// `INSERT INTO t(a, b) VALUES(?, ?);`
pub fn insert<'a>(table: &str, values: &'a ColumnValues) -> Result<RenderedStatement<'a>> {
    if values.is_empty() {
        return Err(Error::EmptyValues {
            operation: "INSERT",
            table: table.to_string(),
        });
    }

    let placeholders = vec!["?"; values.len()].join(", ");
    Ok(RenderedStatement {
        sql: format!(
            "INSERT INTO {}({}) VALUES({});",
            table,
            join_columns(values.keys(), ""),
            placeholders
        ),
        params: values.values().collect(),
    })
}

/// `UPDATE t SET a = ?, b = ? WHERE c = ? AND d = ?`
///
/// SET values are bound first, then the equality criteria. An empty criteria
/// map emits no WHERE clause at all, so the update touches every row.
pub fn update<'a>(
    table: &str,
    values: &'a ColumnValues,
    criteria: &'a ColumnValues,
) -> Result<RenderedStatement<'a>> {
    if values.is_empty() {
        return Err(Error::EmptyValues {
            operation: "UPDATE",
            table: table.to_string(),
        });
    }

    let mut sql = format!("UPDATE {} SET {}", table, join_columns(values.keys(), " = ?"));
    if criteria.is_empty() {
        warn!("UPDATE on '{}' has no criteria and will modify every row", table);
    } else {
        let conditions = criteria
            .keys()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&conditions);
    }

    Ok(RenderedStatement {
        sql,
        params: values.values().chain(criteria.values()).collect(),
    })
}

/// `SELECT a, b FROM t WHERE <criteria>`, or `SELECT *` when no columns are given
pub fn select<'a, S: AsRef<str>>(
    table: &str,
    columns: &[S],
    criteria: &'a QueryCriteria,
) -> Result<RenderedStatement<'a>> {
    if criteria.is_empty() {
        return Err(Error::EmptyCriteria {
            operation: "SELECT",
            table: table.to_string(),
        });
    }

    let projection = if columns.is_empty() {
        "*".to_string()
    } else {
        columns
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    };

    Ok(RenderedStatement {
        sql: format!("SELECT {} FROM {} WHERE {}", projection, table, criteria),
        params: criteria.values().iter().collect(),
    })
}

/// `DELETE FROM t WHERE <criteria>;`
pub fn delete<'a>(table: &str, criteria: &'a QueryCriteria) -> Result<RenderedStatement<'a>> {
    if criteria.is_empty() {
        return Err(Error::EmptyCriteria {
            operation: "DELETE",
            table: table.to_string(),
        });
    }

    Ok(RenderedStatement {
        sql: format!("DELETE FROM {} WHERE {};", table, criteria),
        params: criteria.values().iter().collect(),
    })
}

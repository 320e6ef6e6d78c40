//! Text forms of column maps and criteria
//!
//! Used by the command-line interface:
//!
//! - `name=Raw Materials` assigns a value to a column
//! - `id=integer PRIMARY KEY` declares a column type
//! - `capacity>3600`, `OR name<>Finished Goods` are criteria clauses

use crate::database::core::{ColumnTypes, ColumnValues, SqlValue};
use crate::database::query::{Combinator, PredicateOperator, QueryCriteria};
use crate::error::{Error, Result};

// longest tokens first so `>=` is not read as `>`
const OPERATOR_TOKENS: [&str; 8] = [">=", "<=", "<>", "!=", "==", "=", ">", "<"];

fn split_pair(input: &str) -> Result<(&str, &str)> {
    let (column, rest) = input
        .split_once('=')
        .ok_or_else(|| Error::invalid_value(input, "expected COLUMN=VALUE"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(Error::invalid_value(input, "column name is empty"));
    }
    Ok((column, rest.trim()))
}

/// Parse `COLUMN=VALUE` pairs; values go through [`SqlValue::infer`]
pub fn parse_assignments<S: AsRef<str>>(pairs: &[S]) -> Result<ColumnValues> {
    let mut values = ColumnValues::new();
    for pair in pairs {
        let (column, value) = split_pair(pair.as_ref())?;
        values.insert(column.to_string(), SqlValue::infer(value)?);
    }
    Ok(values)
}

/// Parse `COLUMN=TYPE DECLARATION` pairs
pub fn parse_column_types<S: AsRef<str>>(pairs: &[S]) -> Result<ColumnTypes> {
    let mut columns = ColumnTypes::new();
    for pair in pairs {
        let (column, datatype) = split_pair(pair.as_ref())?;
        if datatype.is_empty() {
            return Err(Error::invalid_value(pair.as_ref(), "column type is empty"));
        }
        columns.insert(column.to_string(), datatype.to_string());
    }
    Ok(columns)
}

/// Parse one `[AND|OR] COLUMN<op>VALUE` clause
pub fn parse_clause(input: &str) -> Result<(Combinator, String, PredicateOperator, SqlValue)> {
    let trimmed = input.trim();
    let (combinator, expr) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) if head.eq_ignore_ascii_case("or") => (Combinator::Or, rest.trim()),
        Some((head, rest)) if head.eq_ignore_ascii_case("and") => (Combinator::And, rest.trim()),
        _ => (Combinator::And, trimmed),
    };

    let op_start = expr
        .find(['=', '<', '>', '!'])
        .ok_or_else(|| Error::invalid_value(input, "expected COLUMN<op>VALUE"))?;
    let column = expr[..op_start].trim();
    if column.is_empty() {
        return Err(Error::invalid_value(input, "column name is empty"));
    }

    let rest = &expr[op_start..];
    let token = OPERATOR_TOKENS
        .iter()
        .find(|t| rest.starts_with(**t))
        .ok_or_else(|| Error::invalid_value(input, "unknown comparison operator"))?;
    let operator = PredicateOperator::from_sql(token)
        .ok_or_else(|| Error::invalid_value(input, "unknown comparison operator"))?;
    let value = SqlValue::infer(rest[token.len()..].trim())?;

    Ok((combinator, column.to_string(), operator, value))
}

/// Build a [`QueryCriteria`] from clauses in order
pub fn parse_criteria<S: AsRef<str>>(clauses: &[S]) -> Result<QueryCriteria> {
    clauses.iter().try_fold(QueryCriteria::new(), |criteria, clause| {
        let (combinator, column, operator, value) = parse_clause(clause.as_ref())?;
        Ok(criteria.push(combinator, &column, operator, value))
    })
}

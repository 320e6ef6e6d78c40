//! Fluent predicate builder for WHERE clauses
//!
//! [`QueryCriteria`] accumulates comparison clauses in the order they are
//! added and renders them as one boolean expression with `?` placeholders,
//! keeping the bound values in a parallel list.
//!
//! # Usage
//!
//! ```rust
//! use sqlite_utils::QueryCriteria;
//!
//! let criteria = QueryCriteria::new()
//!     .and_greater_than("capacity", 3600)
//!     .or_equals("name", "Raw Materials");
//!
//! assert_eq!(criteria.sql(), "(capacity > ?) OR (name = ?)");
//! assert_eq!(criteria.len(), 2);
//! ```

use std::fmt;

use crate::database::core::SqlValue;

/// Boolean joiner placed before every clause but the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operator of a single clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateOperator {
    Equals,
    NotEqualTo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqualTo,
    LessThanOrEqualTo,
}

impl PredicateOperator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEqualTo => "<>",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThanOrEqualTo => "<=",
        }
    }

    /// Look up an operator by its SQL token
    pub fn from_sql(token: &str) -> Option<Self> {
        match token {
            "=" | "==" => Some(Self::Equals),
            "<>" | "!=" => Some(Self::NotEqualTo),
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            ">=" => Some(Self::GreaterThanOrEqualTo),
            "<=" => Some(Self::LessThanOrEqualTo),
            _ => None,
        }
    }
}

/// Ordered list of `(column operator ?)` clauses plus their bound values
///
/// Column names are written into the SQL text as given; they are neither
/// validated nor quoted. Values never are: each one becomes a `?`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryCriteria {
    sql: String,
    values: Vec<SqlValue>,
}

impl QueryCriteria {
    /// Create an empty criteria object
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one clause
    ///
    /// The combinator is ignored for the first clause.
    pub fn push(
        mut self,
        combinator: Combinator,
        column: &str,
        operator: PredicateOperator,
        value: impl Into<SqlValue>,
    ) -> Self {
        if !self.sql.is_empty() {
            self.sql.push(' ');
            self.sql.push_str(combinator.as_sql());
            self.sql.push(' ');
        }
        self.sql
            .push_str(&format!("({} {} ?)", column, operator.as_sql()));
        self.values.push(value.into());
        self
    }

    pub fn and_equals(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::And, column, PredicateOperator::Equals, value)
    }

    pub fn and_not_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::And, column, PredicateOperator::NotEqualTo, value)
    }

    pub fn and_greater_than(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::And, column, PredicateOperator::GreaterThan, value)
    }

    pub fn and_less_than(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::And, column, PredicateOperator::LessThan, value)
    }

    pub fn and_greater_than_or_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(
            Combinator::And,
            column,
            PredicateOperator::GreaterThanOrEqualTo,
            value,
        )
    }

    pub fn and_less_than_or_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(
            Combinator::And,
            column,
            PredicateOperator::LessThanOrEqualTo,
            value,
        )
    }

    pub fn or_equals(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::Or, column, PredicateOperator::Equals, value)
    }

    pub fn or_not_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::Or, column, PredicateOperator::NotEqualTo, value)
    }

    pub fn or_greater_than(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::Or, column, PredicateOperator::GreaterThan, value)
    }

    pub fn or_less_than(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(Combinator::Or, column, PredicateOperator::LessThan, value)
    }

    pub fn or_greater_than_or_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(
            Combinator::Or,
            column,
            PredicateOperator::GreaterThanOrEqualTo,
            value,
        )
    }

    pub fn or_less_than_or_equal_to(self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.push(
            Combinator::Or,
            column,
            PredicateOperator::LessThanOrEqualTo,
            value,
        )
    }

    /// The accumulated boolean expression, exactly as built
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values, in the order their clauses were added
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Number of clauses
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the builder into its expression text and values
    pub fn render(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }
}

impl fmt::Display for QueryCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

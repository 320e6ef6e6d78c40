//! Scalar values bound into statements
//!
//! Every value written to or compared against a column is one of five kinds.
//! The set is closed, so an unsupported host type cannot reach the binder.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::types::{ToSql, ToSqlOutput};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// Date format used when binding and parsing [`SqlValue::Date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column name to value, iterated in ascending column-name order
pub type ColumnValues = BTreeMap<String, SqlValue>;

/// Column name to type declaration (e.g. `"integer PRIMARY KEY"`)
pub type ColumnTypes = BTreeMap<String, String>;

/// A scalar value that can be bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
    /// Bound as its canonical text form so no precision is lost
    Decimal(Decimal),
    /// Bound as ISO-8601 `YYYY-MM-DD` text
    Date(NaiveDate),
}

impl SqlValue {
    /// Name of the value kind, as accepted by the `kind:` prefix in [`SqlValue::infer`]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "int",
            Self::Real(_) => "real",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
        }
    }

    /// Parse a command-line literal into a value
    ///
    /// A `text:`, `int:`, `real:`, `decimal:` or `date:` prefix forces the kind.
    /// Without a prefix the literal is tried as an integer, a float and an
    /// ISO date in that order, falling back to text.
    pub fn infer(input: &str) -> Result<Self> {
        if let Some((kind, rest)) = input.split_once(':') {
            match kind {
                "text" => return Ok(Self::Text(rest.to_string())),
                "int" => {
                    return rest
                        .parse::<i64>()
                        .map(Self::Integer)
                        .map_err(|e| Error::invalid_value(input, e.to_string()))
                }
                "real" => {
                    return rest
                        .parse::<f64>()
                        .map(Self::Real)
                        .map_err(|e| Error::invalid_value(input, e.to_string()))
                }
                "decimal" => {
                    return Decimal::from_str(rest)
                        .map(Self::Decimal)
                        .map_err(|e| Error::invalid_value(input, e.to_string()))
                }
                "date" => {
                    return NaiveDate::parse_from_str(rest, DATE_FORMAT)
                        .map(Self::Date)
                        .map_err(|e| Error::invalid_value(input, e.to_string()))
                }
                _ => {}
            }
        }

        if let Ok(i) = input.parse::<i64>() {
            return Ok(Self::Integer(i));
        }
        // `f64::from_str` also accepts "inf" and "NaN"; only numeric-looking input counts
        if input
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            if let Ok(f) = input.parse::<f64>() {
                return Ok(Self::Real(f));
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
            return Ok(Self::Date(d));
        }
        Ok(Self::Text(input.to_string()))
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Text(s) => ToSqlOutput::from(s.as_str()),
            Self::Integer(i) => ToSqlOutput::from(*i),
            Self::Real(f) => ToSqlOutput::from(*f),
            Self::Decimal(d) => ToSqlOutput::from(d.to_string()),
            Self::Date(d) => ToSqlOutput::from(d.format(DATE_FORMAT).to_string()),
        })
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Real(r) => write!(f, "{}", r),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Real(f) => serializer.serialize_f64(*f),
            Self::Decimal(d) => serializer.serialize_str(&d.to_string()),
            Self::Date(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::types::{Value, ValueRef};

    fn bound(value: &SqlValue) -> Value {
        match value.to_sql().unwrap() {
            ToSqlOutput::Borrowed(v) => Value::from(v),
            ToSqlOutput::Owned(v) => v,
            _ => panic!("unexpected ToSqlOutput variant"),
        }
    }

    #[test]
    fn test_binding_kinds() {
        assert_eq!(bound(&"A".into()), Value::Text("A".to_string()));
        assert_eq!(bound(&3000.into()), Value::Integer(3000));
        assert_eq!(bound(&5500.5.into()), Value::Real(5500.5));

        let d = Decimal::from_str("12.50").unwrap();
        assert_eq!(bound(&d.into()), Value::Text("12.50".to_string()));

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(bound(&date.into()), Value::Text("2024-02-29".to_string()));
    }

    #[test]
    fn test_borrowed_text_is_not_copied() {
        let value = SqlValue::from("borrowed");
        match value.to_sql().unwrap() {
            ToSqlOutput::Borrowed(ValueRef::Text(t)) => assert_eq!(t, b"borrowed"),
            other => panic!("expected borrowed text, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_untyped() {
        assert_eq!(SqlValue::infer("42").unwrap(), SqlValue::Integer(42));
        assert_eq!(SqlValue::infer("-7").unwrap(), SqlValue::Integer(-7));
        assert_eq!(SqlValue::infer("3.5").unwrap(), SqlValue::Real(3.5));
        assert_eq!(
            SqlValue::infer("2023-10-11").unwrap(),
            SqlValue::Date(NaiveDate::from_ymd_opt(2023, 10, 11).unwrap())
        );
        assert_eq!(
            SqlValue::infer("Raw Materials").unwrap(),
            SqlValue::Text("Raw Materials".to_string())
        );
        assert_eq!(
            SqlValue::infer("inf").unwrap(),
            SqlValue::Text("inf".to_string())
        );
    }

    #[test]
    fn test_infer_prefixed() {
        assert_eq!(
            SqlValue::infer("text:42").unwrap(),
            SqlValue::Text("42".to_string())
        );
        assert_eq!(SqlValue::infer("real:1").unwrap(), SqlValue::Real(1.0));
        assert_eq!(
            SqlValue::infer("decimal:0.10").unwrap(),
            SqlValue::Decimal(Decimal::from_str("0.10").unwrap())
        );
        // unknown prefixes are not special
        assert_eq!(
            SqlValue::infer("http://example.com").unwrap(),
            SqlValue::Text("http://example.com".to_string())
        );
        assert!(matches!(
            SqlValue::infer("int:abc"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(SqlValue::infer("date:2023-13-01").is_err());
    }

    #[test]
    fn test_column_values_are_name_ordered() {
        let mut values = ColumnValues::new();
        values.insert("name".to_string(), "Raw Materials".into());
        values.insert("capacity".to_string(), 3000.into());
        values.insert("id".to_string(), 1.into());

        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["capacity", "id", "name"]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&vec![
            SqlValue::from("A"),
            SqlValue::from(1),
            SqlValue::from(Decimal::from_str("1.5").unwrap()),
        ])
        .unwrap();
        assert_eq!(json, r#"["A",1,"1.5"]"#);
    }
}

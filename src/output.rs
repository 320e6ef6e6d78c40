//! Output formatting for query results
//!
//! Result rows are captured as [`RowRecord`]s (ordered column/value pairs)
//! and rendered in one of the [`OutputFormat`]s.

use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default maximum width of a text cell in table output
pub const DEFAULT_CELL_MAX_LEN: usize = 40;

/// Unified output format for all commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Pretty table with borders (default)
    #[default]
    Table,
    /// Markdown table format
    Markdown,
    /// Compact JSON array
    Json,
    /// Pretty-printed JSON with indentation
    JsonPretty,
    /// JSON Lines format (one JSON object per line, for streaming)
    JsonLine,
    /// Pipe-separated values with header
    Psv,
}

impl OutputFormat {
    /// Check if this is a JSON variant
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty | Self::JsonLine)
    }

    /// Check if this is a table variant
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table | Self::Markdown)
    }

    /// Get a list of all format names for help text
    pub fn all_names() -> &'static [&'static str] {
        &[
            "table",
            "markdown",
            "json",
            "json-pretty",
            "json-line",
            "psv",
        ]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json-pretty"),
            Self::JsonLine => write!(f, "json-line"),
            Self::Psv => write!(f, "psv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "pretty" => Ok(Self::Table),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            "json-line" | "jsonline" | "jsonl" | "ndjson" => Ok(Self::JsonLine),
            "psv" | "pipe" => Ok(Self::Psv),
            _ => Err(format!(
                "Unknown output format '{}'. Valid formats: {}",
                s,
                Self::all_names().join(", ")
            )),
        }
    }
}

/// One result row, with columns in result order
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub columns: Vec<(String, Value)>,
}

impl RowRecord {
    /// Capture every column of a result row
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let names: Vec<String> = row
            .as_ref()
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut columns = Vec::with_capacity(names.len());
        for (i, name) in names.into_iter().enumerate() {
            let value = match row.get_ref(i)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::from(v),
                ValueRef::Real(v) => Value::from(v),
                ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
                ValueRef::Blob(b) => Value::String(format!("<{} bytes>", b.len())),
            };
            columns.push((name, value));
        }
        Ok(Self { columns })
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    fn cells(&self) -> impl Iterator<Item = String> + '_ {
        self.columns.iter().map(|(_, value)| match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Truncate a string to the specified length, adding "..." if truncated
///
/// ```
/// use sqlite_utils::output::truncate_cell;
///
/// assert_eq!(truncate_cell("Short", 20), "Short");
/// assert_eq!(truncate_cell("This is a very long name", 20), "This is a very lo...");
/// ```
pub fn truncate_cell(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Render rows in the requested format
///
/// `header` names the columns when `rows` is empty; otherwise the first
/// row's column names are used.
pub fn format_rows(rows: &[RowRecord], header: &[String], format: OutputFormat) -> String {
    let header: Vec<String> = match rows.first() {
        Some(first) => first.columns.iter().map(|(name, _)| name.clone()).collect(),
        None => header.to_vec(),
    };

    match format {
        OutputFormat::Table | OutputFormat::Markdown => format_table(rows, &header, format),
        OutputFormat::Json => serde_json::to_string(rows).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(rows).unwrap_or_default(),
        OutputFormat::JsonLine => rows
            .iter()
            .filter_map(|r| serde_json::to_string(r).ok())
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Psv => format_psv(rows, &header),
    }
}

fn format_psv(rows: &[RowRecord], header: &[String]) -> String {
    let mut lines = vec![header.join("|")];
    for row in rows {
        lines.push(row.cells().collect::<Vec<_>>().join("|"));
    }
    lines.join("\n")
}

#[cfg(feature = "display")]
fn format_table(rows: &[RowRecord], header: &[String], format: OutputFormat) -> String {
    use tabled::builder::Builder;
    use tabled::settings::Style;

    let mut builder = Builder::default();
    builder.push_record(header.iter().cloned());
    for row in rows {
        builder.push_record(row.cells().map(|c| truncate_cell(&c, DEFAULT_CELL_MAX_LEN)));
    }

    let mut table = builder.build();
    match format {
        OutputFormat::Markdown => table.with(Style::markdown()),
        _ => table.with(Style::rounded()),
    };
    table.to_string()
}

#[cfg(not(feature = "display"))]
fn format_table(rows: &[RowRecord], header: &[String], _format: OutputFormat) -> String {
    format_psv(rows, header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn sample_rows() -> Vec<RowRecord> {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER, name TEXT, capacity REAL, note TEXT);
             INSERT INTO t VALUES (1, 'Raw Materials', 3000.0, NULL);
             INSERT INTO t VALUES (2, 'Finished Goods', 5000.5, 'x');",
        )
        .unwrap();

        let mut stmt = conn.prepare("SELECT * FROM t ORDER BY id").unwrap();
        let rows = stmt
            .query_map([], |row| RowRecord::from_row(row))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        rows
    }

    #[test]
    fn test_row_record_from_row() {
        let rows = sample_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some(&Value::from(1)));
        assert_eq!(rows[0].get("name"), Some(&Value::from("Raw Materials")));
        assert_eq!(rows[0].get("note"), Some(&Value::Null));
        assert_eq!(rows[1].get("capacity"), Some(&Value::from(5000.5)));
        assert_eq!(rows[1].get("missing"), None);
    }

    #[test]
    fn test_json_keeps_column_order() {
        let rows = sample_rows();
        let json = format_rows(&rows[..1], &[], OutputFormat::Json);
        assert_eq!(
            json,
            r#"[{"id":1,"name":"Raw Materials","capacity":3000.0,"note":null}]"#
        );
    }

    #[test]
    fn test_psv() {
        let rows = sample_rows();
        let psv = format_rows(&rows, &[], OutputFormat::Psv);
        assert_eq!(
            psv,
            "id|name|capacity|note\n1|Raw Materials|3000.0|\n2|Finished Goods|5000.5|x"
        );
    }

    #[test]
    fn test_psv_empty_uses_header() {
        let header = vec!["id".to_string(), "name".to_string()];
        assert_eq!(format_rows(&[], &header, OutputFormat::Psv), "id|name");
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("Short", 20), "Short");
        assert_eq!(
            truncate_cell("This is a very long organization name", 20),
            "This is a very lo..."
        );
        assert_eq!(truncate_cell("Hello", 3), "...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("table").unwrap(),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::from_str("md").unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(
            OutputFormat::from_str("jsonl").unwrap(),
            OutputFormat::JsonLine
        );
        assert_eq!(OutputFormat::from_str("psv").unwrap(), OutputFormat::Psv);
        assert!(OutputFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_display() {
        for name in OutputFormat::all_names() {
            let format = OutputFormat::from_str(name).unwrap();
            assert_eq!(&format.to_string(), name);
        }
    }
}

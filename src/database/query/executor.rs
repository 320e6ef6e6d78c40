//! Statement execution against a borrowed connection
//!
//! [`Executor`] renders statements through [`crate::database::query::statement`],
//! prepares them, binds parameters positionally and runs them. Prepared
//! statements and row cursors live only for the duration of one call.

use rusqlite::{params_from_iter, Connection, Row};
use tracing::{debug, warn};

use crate::database::core::{ColumnTypes, ColumnValues, SqlValue};
use crate::database::query::statement::{self, RenderedStatement};
use crate::database::query::QueryCriteria;
use crate::error::{Error, Result};

/// What to do when a row handler returns an error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Stop iterating and return the handler's error
    #[default]
    Propagate,
    /// Log the error and move on to the next row
    LogAndContinue,
}

/// Runs assembled statements on a single connection
///
/// The executor holds no state of its own beyond the borrowed connection.
pub struct Executor<'a> {
    conn: &'a Connection,
}

impl<'a> Executor<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a table if it does not exist yet
    pub fn create_new_table(&self, table: &str, columns: &ColumnTypes) -> Result<()> {
        let stmt = statement::create_table(table, columns)?;
        self.execute(&stmt)?;
        Ok(())
    }

    /// Insert one row, returning the number of affected rows
    pub fn insert(&self, table: &str, values: &ColumnValues) -> Result<usize> {
        let stmt = statement::insert(table, values)?;
        self.execute(&stmt)
    }

    /// Rowid of the most recent successful insert on this connection
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Update rows matching every equality in `criteria`
    ///
    /// An empty `criteria` map updates every row in the table.
    pub fn update(
        &self,
        table: &str,
        values: &ColumnValues,
        criteria: &ColumnValues,
    ) -> Result<usize> {
        let stmt = statement::update(table, values, criteria)?;
        self.execute(&stmt)
    }

    /// Delete rows matching `criteria`
    pub fn delete(&self, table: &str, criteria: &QueryCriteria) -> Result<usize> {
        let stmt = statement::delete(table, criteria)?;
        self.execute(&stmt)
    }

    /// Run caller-written SQL and hand each result row to `handler`
    ///
    /// Returns the number of rows passed to the handler.
    pub fn select_sql<F>(&self, sql: &str, handler: F) -> Result<usize>
    where
        F: FnMut(&Row<'_>) -> anyhow::Result<()>,
    {
        self.select_sql_with_policy(sql, RowErrorPolicy::Propagate, handler)
    }

    pub fn select_sql_with_policy<F>(
        &self,
        sql: &str,
        policy: RowErrorPolicy,
        handler: F,
    ) -> Result<usize>
    where
        F: FnMut(&Row<'_>) -> anyhow::Result<()>,
    {
        self.query(sql, &[], policy, handler)
    }

    /// Select `columns` (all columns when empty) from rows matching `criteria`
    pub fn select<S, F>(
        &self,
        table: &str,
        columns: &[S],
        criteria: &QueryCriteria,
        handler: F,
    ) -> Result<usize>
    where
        S: AsRef<str>,
        F: FnMut(&Row<'_>) -> anyhow::Result<()>,
    {
        self.select_with_policy(table, columns, criteria, RowErrorPolicy::Propagate, handler)
    }

    pub fn select_with_policy<S, F>(
        &self,
        table: &str,
        columns: &[S],
        criteria: &QueryCriteria,
        policy: RowErrorPolicy,
        handler: F,
    ) -> Result<usize>
    where
        S: AsRef<str>,
        F: FnMut(&Row<'_>) -> anyhow::Result<()>,
    {
        let stmt = statement::select(table, columns, criteria)?;
        self.query(&stmt.sql, &stmt.params, policy, handler)
    }

    fn execute(&self, rendered: &RenderedStatement<'_>) -> Result<usize> {
        debug!("{}", rendered.sql);

        let mut stmt = self
            .conn
            .prepare(&rendered.sql)
            .map_err(|e| prepare_failed(&rendered.sql, e))?;
        stmt.execute(params_from_iter(rendered.params.iter()))
            .map_err(|e| execute_failed(&rendered.sql, e))
    }

    fn query<F>(
        &self,
        sql: &str,
        params: &[&SqlValue],
        policy: RowErrorPolicy,
        mut handler: F,
    ) -> Result<usize>
    where
        F: FnMut(&Row<'_>) -> anyhow::Result<()>,
    {
        debug!("{}", sql);

        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| prepare_failed(sql, e))?;
        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .map_err(|e| execute_failed(sql, e))?;

        let mut handled = 0;
        while let Some(row) = rows.next().map_err(|e| execute_failed(sql, e))? {
            let index = handled;
            handled += 1;
            if let Err(e) = handler(row) {
                match policy {
                    RowErrorPolicy::Propagate => {
                        return Err(Error::RowHandler {
                            row: index,
                            source: e,
                        })
                    }
                    RowErrorPolicy::LogAndContinue => {
                        warn!(row = index, "row handler failed, continuing: {:#}", e);
                    }
                }
            }
        }
        Ok(handled)
    }
}

fn prepare_failed(sql: &str, e: rusqlite::Error) -> Error {
    warn!(sql, error = ?e, "failed to prepare statement: {}", e);
    Error::Prepare {
        sql: sql.to_string(),
        source: e,
    }
}

fn execute_failed(sql: &str, e: rusqlite::Error) -> Error {
    warn!(sql, error = ?e, "failed to execute statement: {}", e);
    Error::Execute {
        sql: sql.to_string(),
        source: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::DatabaseConn;
    use anyhow::anyhow;

    fn warehouses_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        let mut columns = ColumnTypes::new();
        columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
        columns.insert("name".to_string(), "text NOT NULL".to_string());
        columns.insert("capacity".to_string(), "real".to_string());
        db.executor()
            .create_new_table("warehouses", &columns)
            .unwrap();

        for (name, capacity) in [
            ("Raw Materials", 3000),
            ("Semifinished Goods", 4000),
            ("Finished Goods", 5000),
        ] {
            let mut values = ColumnValues::new();
            values.insert("name".to_string(), name.into());
            values.insert("capacity".to_string(), capacity.into());
            assert_eq!(db.executor().insert("warehouses", &values).unwrap(), 1);
        }
        db
    }

    #[test]
    fn test_insert_then_select_all() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let mut columns = ColumnTypes::new();
        columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
        columns.insert("name".to_string(), "text".to_string());
        let exec = db.executor();
        exec.create_new_table("t", &columns).unwrap();

        let mut values = ColumnValues::new();
        values.insert("name".to_string(), "A".into());
        exec.insert("t", &values).unwrap();
        let id = exec.last_insert_rowid();

        let mut rows = Vec::new();
        let count = exec
            .select_sql("SELECT * FROM t", |row| {
                rows.push((row.get::<_, i64>("id")?, row.get::<_, String>("name")?));
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(rows, vec![(id, "A".to_string())]);
    }

    #[test]
    fn test_create_table_is_idempotent() {
        let db = warehouses_db();
        let mut columns = ColumnTypes::new();
        columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
        db.executor()
            .create_new_table("warehouses", &columns)
            .unwrap();
        assert_eq!(db.table_count("warehouses").unwrap(), 3);
    }

    #[test]
    fn test_select_greater_than() {
        let db = warehouses_db();
        let criteria = QueryCriteria::new().and_greater_than("capacity", 3600);

        let mut capacities = Vec::new();
        db.executor()
            .select("warehouses", &["id", "name", "capacity"], &criteria, |row| {
                capacities.push(row.get::<_, f64>("capacity")?);
                Ok(())
            })
            .unwrap();

        capacities.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(capacities, vec![4000.0, 5000.0]);
    }

    #[test]
    fn test_round_trip_by_primary_key() {
        let db = warehouses_db();
        let exec = db.executor();

        let mut values = ColumnValues::new();
        values.insert("name".to_string(), "Spare Parts".into());
        values.insert("capacity".to_string(), 1234.5.into());
        exec.insert("warehouses", &values).unwrap();
        let id = exec.last_insert_rowid();

        let criteria = QueryCriteria::new().and_equals("id", id);
        let mut found = Vec::new();
        let no_columns: [&str; 0] = [];
        exec.select("warehouses", &no_columns, &criteria, |row| {
            found.push((
                row.get::<_, i64>("id")?,
                row.get::<_, String>("name")?,
                row.get::<_, f64>("capacity")?,
            ));
            Ok(())
        })
        .unwrap();

        assert_eq!(found, vec![(id, "Spare Parts".to_string(), 1234.5)]);
    }

    #[test]
    fn test_update_by_id() {
        let db = warehouses_db();
        let exec = db.executor();

        let mut values = ColumnValues::new();
        values.insert("name".to_string(), "Finished Products".into());
        values.insert("capacity".to_string(), 5500.into());
        let mut criteria = ColumnValues::new();
        criteria.insert("id".to_string(), 3.into());
        assert_eq!(exec.update("warehouses", &values, &criteria).unwrap(), 1);

        let name: String = db
            .conn
            .query_row("SELECT name FROM warehouses WHERE id = 3", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(name, "Finished Products");
    }

    #[test]
    fn test_update_without_criteria_touches_every_row() {
        let db = warehouses_db();
        let mut values = ColumnValues::new();
        values.insert("capacity".to_string(), 0.into());

        let updated = db
            .executor()
            .update("warehouses", &values, &ColumnValues::new())
            .unwrap();
        assert_eq!(updated, 3);
    }

    #[test]
    fn test_delete_by_unique_key() {
        let db = warehouses_db();
        let before = db.table_count("warehouses").unwrap();

        let criteria = QueryCriteria::new().and_equals("id", 3);
        assert_eq!(db.executor().delete("warehouses", &criteria).unwrap(), 1);
        assert_eq!(db.table_count("warehouses").unwrap(), before - 1);
    }

    #[test]
    fn test_empty_criteria_never_reaches_driver() {
        let db = warehouses_db();
        let result = db.executor().delete("warehouses", &QueryCriteria::new());
        assert!(matches!(result, Err(Error::EmptyCriteria { .. })));
        assert_eq!(db.table_count("warehouses").unwrap(), 3);
    }

    #[test]
    fn test_driver_errors_are_typed() {
        let db = warehouses_db();
        let exec = db.executor();

        let result = exec.select_sql("SELECT FROM nowhere", |_| Ok(()));
        assert!(matches!(result, Err(Error::Prepare { .. })));

        // NOT NULL violation on `name`
        let mut values = ColumnValues::new();
        values.insert("capacity".to_string(), 1.into());
        let result = exec.insert("warehouses", &values);
        assert!(matches!(result, Err(Error::Execute { .. })));
    }

    #[test]
    fn test_row_handler_error_propagates() {
        let db = warehouses_db();
        let mut seen = 0;
        let result = db
            .executor()
            .select_sql("SELECT id FROM warehouses ORDER BY id", |_| {
                seen += 1;
                if seen == 2 {
                    return Err(anyhow!("bad row"));
                }
                Ok(())
            });

        assert!(matches!(result, Err(Error::RowHandler { row: 1, .. })));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_row_handler_error_can_be_skipped() {
        let db = warehouses_db();
        let mut ok_ids = Vec::new();
        let count = db
            .executor()
            .select_sql_with_policy(
                "SELECT id FROM warehouses ORDER BY id",
                RowErrorPolicy::LogAndContinue,
                |row| {
                    let id: i64 = row.get(0)?;
                    if id == 2 {
                        return Err(anyhow!("skip {}", id));
                    }
                    ok_ids.push(id);
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(ok_ids, vec![1, 3]);
    }
}

//! Walk through every statement kind on a small warehouses table.
//!
//! ```text
//! cargo run --example warehouses
//! cargo run --example warehouses -- /tmp/warehouses.sqlite3
//! ```

use anyhow::Result;
use sqlite_utils::{ColumnTypes, ColumnValues, DatabaseConn, QueryCriteria, SqlValue};

fn print_warehouses(db: &DatabaseConn, title: &str, criteria: &QueryCriteria) -> Result<()> {
    println!("{}", title);
    let rows = db.executor().select(
        "warehouses",
        &["id", "name", "capacity"],
        criteria,
        |row| {
            let id: i64 = row.get("id")?;
            let name: String = row.get("name")?;
            let capacity: f64 = row.get("capacity")?;
            println!("  {:>3} | {:<16} | {:>8.1}", id, name, capacity);
            Ok(())
        },
    )?;
    println!("  ({} rows)", rows);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args().nth(1);
    let db = DatabaseConn::open(path.as_deref())?;
    let exec = db.executor();

    let mut columns = ColumnTypes::new();
    columns.insert("id".to_string(), "integer PRIMARY KEY".to_string());
    columns.insert("name".to_string(), "text NOT NULL".to_string());
    columns.insert("capacity".to_string(), "real".to_string());
    exec.create_new_table("warehouses", &columns)?;

    for (name, capacity) in [
        ("Raw Materials", 3000),
        ("Semifinished Goods", 4000),
        ("Finished Goods", 5000),
    ] {
        let mut values = ColumnValues::new();
        values.insert("name".to_string(), name.into());
        values.insert("capacity".to_string(), capacity.into());
        exec.insert("warehouses", &values)?;
    }

    println!("raw select:");
    exec.select_sql("SELECT id, name, capacity FROM warehouses", |row| {
        let name: String = row.get(1)?;
        println!("  {}", name);
        Ok(())
    })?;

    let mut values = ColumnValues::new();
    values.insert("name".to_string(), SqlValue::from("Finished Goods (east)"));
    values.insert("capacity".to_string(), SqlValue::from(5500));
    let mut criteria = ColumnValues::new();
    criteria.insert("id".to_string(), SqlValue::from(3));
    exec.update("warehouses", &values, &criteria)?;

    let larger = QueryCriteria::new().and_greater_than("capacity", 3600);
    print_warehouses(&db, "capacity > 3600:", &larger)?;

    exec.delete("warehouses", &QueryCriteria::new().and_equals("id", 3))?;

    let everything = QueryCriteria::new().and_greater_than_or_equal_to("id", 0);
    print_warehouses(&db, "after deleting id 3:", &everything)?;

    Ok(())
}

use anyhow::Result;
use clap::Args;
use sqlite_utils::database::query::parse::parse_assignments;
use sqlite_utils::DatabaseConn;

/// Arguments for the Insert command
#[derive(Args)]
pub struct InsertArgs {
    /// Table to insert into
    #[clap(value_name = "TABLE")]
    pub table: String,

    /// Column values, e.g. `name="Raw Materials"` `capacity=3000`
    #[clap(value_name = "COLUMN=VALUE", required = true)]
    pub values: Vec<String>,
}

pub fn run(db: &DatabaseConn, args: InsertArgs) -> Result<()> {
    let InsertArgs { table, values } = args;

    let values = parse_assignments(&values)?;
    let exec = db.executor();
    exec.insert(&table, &values)?;
    println!("Inserted row {} into '{}'", exec.last_insert_rowid(), table);
    Ok(())
}

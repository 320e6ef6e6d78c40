use anyhow::Result;
use clap::Args;
use sqlite_utils::database::query::parse::parse_column_types;
use sqlite_utils::DatabaseConn;

/// Arguments for the CreateTable command
#[derive(Args)]
pub struct CreateTableArgs {
    /// Name of the table to create
    #[clap(value_name = "TABLE")]
    pub table: String,

    /// Column declarations, e.g. `id="integer PRIMARY KEY"` `name=text`
    #[clap(value_name = "COLUMN=TYPE", required = true)]
    pub columns: Vec<String>,
}

pub fn run(db: &DatabaseConn, args: CreateTableArgs) -> Result<()> {
    let CreateTableArgs { table, columns } = args;

    let columns = parse_column_types(&columns)?;
    db.executor().create_new_table(&table, &columns)?;
    println!("Table '{}' is ready ({} columns)", table, columns.len());
    Ok(())
}

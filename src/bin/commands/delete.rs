use anyhow::Result;
use clap::Args;
use sqlite_utils::database::query::parse::parse_criteria;
use sqlite_utils::DatabaseConn;

/// Arguments for the Delete command
#[derive(Args)]
pub struct DeleteArgs {
    /// Table to delete from
    #[clap(value_name = "TABLE")]
    pub table: String,

    /// Criteria clauses, e.g. `--where id=3 --where "OR id=4"`
    #[clap(long = "where", value_name = "EXPR", required = true)]
    pub criteria: Vec<String>,
}

pub fn run(db: &DatabaseConn, args: DeleteArgs) -> Result<()> {
    let DeleteArgs { table, criteria } = args;

    let criteria = parse_criteria(&criteria)?;
    let deleted = db.executor().delete(&table, &criteria)?;
    println!("Deleted {} row(s) from '{}'", deleted, table);
    Ok(())
}

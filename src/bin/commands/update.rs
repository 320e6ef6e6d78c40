use anyhow::{anyhow, Result};
use clap::Args;
use sqlite_utils::database::query::parse::parse_assignments;
use sqlite_utils::DatabaseConn;

/// Arguments for the Update command
#[derive(Args)]
pub struct UpdateArgs {
    /// Table to update
    #[clap(value_name = "TABLE")]
    pub table: String,

    /// New column values, e.g. `--set capacity=5500`
    #[clap(long = "set", value_name = "COLUMN=VALUE", required = true)]
    pub set: Vec<String>,

    /// Equality criteria, all of which must match, e.g. `--where id=3`
    #[clap(long = "where", value_name = "COLUMN=VALUE")]
    pub criteria: Vec<String>,

    /// Allow updating every row when no criteria are given
    #[clap(long)]
    pub all: bool,
}

pub fn run(db: &DatabaseConn, args: UpdateArgs) -> Result<()> {
    let UpdateArgs {
        table,
        set,
        criteria,
        all,
    } = args;

    if criteria.is_empty() && !all {
        return Err(anyhow!(
            "refusing to update every row of '{}' without --where; pass --all to confirm",
            table
        ));
    }

    let values = parse_assignments(&set)?;
    let criteria = parse_assignments(&criteria)?;
    let updated = db.executor().update(&table, &values, &criteria)?;
    println!("Updated {} row(s) in '{}'", updated, table);
    Ok(())
}

use anyhow::Result;
use clap::Args;
use sqlite_utils::database::query::parse::parse_criteria;
use sqlite_utils::output::format_rows;
use sqlite_utils::{DatabaseConn, OutputFormat, RowErrorPolicy, RowRecord};

/// Arguments for the Select command
#[derive(Args)]
pub struct SelectArgs {
    /// Table to select from
    #[clap(value_name = "TABLE")]
    pub table: String,

    /// Comma-separated columns to return; all columns when omitted
    #[clap(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Criteria clauses, e.g. `--where "capacity>3600" --where "OR name=Raw Materials"`
    #[clap(long = "where", value_name = "EXPR", required = true)]
    pub criteria: Vec<String>,

    /// Skip rows that cannot be read instead of stopping
    #[clap(long)]
    pub skip_bad_rows: bool,
}

/// Arguments for the Query command
#[derive(Args)]
pub struct QueryArgs {
    /// SQL query text
    #[clap(value_name = "SQL")]
    pub sql: String,

    /// Skip rows that cannot be read instead of stopping
    #[clap(long)]
    pub skip_bad_rows: bool,
}

fn policy(skip_bad_rows: bool) -> RowErrorPolicy {
    if skip_bad_rows {
        RowErrorPolicy::LogAndContinue
    } else {
        RowErrorPolicy::Propagate
    }
}

pub fn run_select(db: &DatabaseConn, args: SelectArgs, output_format: OutputFormat) -> Result<()> {
    let SelectArgs {
        table,
        columns,
        criteria,
        skip_bad_rows,
    } = args;

    let criteria = parse_criteria(&criteria)?;
    let mut records = Vec::new();
    db.executor().select_with_policy(
        &table,
        &columns,
        &criteria,
        policy(skip_bad_rows),
        |row| {
            records.push(RowRecord::from_row(row)?);
            Ok(())
        },
    )?;

    println!("{}", format_rows(&records, &columns, output_format));
    Ok(())
}

pub fn run_query(db: &DatabaseConn, args: QueryArgs, output_format: OutputFormat) -> Result<()> {
    let QueryArgs { sql, skip_bad_rows } = args;

    let mut records = Vec::new();
    db.executor()
        .select_sql_with_policy(&sql, policy(skip_bad_rows), |row| {
            records.push(RowRecord::from_row(row)?);
            Ok(())
        })?;

    println!("{}", format_rows(&records, &[], output_format));
    Ok(())
}

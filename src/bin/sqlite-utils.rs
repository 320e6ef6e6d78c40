use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use sqlite_utils::database::ensure_parent_dir;
use sqlite_utils::{DatabaseConn, OutputFormat, SqliteUtilsConfig};
use tracing::Level;

mod commands;

use commands::config::ConfigArgs;
use commands::delete::DeleteArgs;
use commands::insert::InsertArgs;
use commands::select::{QueryArgs, SelectArgs};
use commands::table::CreateTableArgs;
use commands::update::UpdateArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.sqlite-utils/sqlite-utils.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// SQLite database file, created if missing (overrides the configured one)
    #[clap(short, long, global = true)]
    database: Option<String>,

    /// Write diagnostic logs to this file
    #[clap(long, global = true)]
    log_file: Option<String>,

    /// Print debug information
    #[clap(long, global = true)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a table if it does not exist yet
    CreateTable(CreateTableArgs),

    /// Insert one row
    Insert(InsertArgs),

    /// Update rows matching equality criteria
    Update(UpdateArgs),

    /// Select rows matching criteria
    Select(SelectArgs),

    /// Delete rows matching criteria
    Delete(DeleteArgs),

    /// Run a raw SQL query and print its rows
    Query(QueryArgs),

    /// Show the current configuration
    Config(ConfigArgs),
}

fn init_logging(debug: bool, log_file: Option<&str>) -> Result<()> {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow!("Unable to open log file {}: {}", path, e))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if debug => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = SqliteUtilsConfig::new(&cli.config)?;

    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    init_logging(cli.debug, log_file)?;

    let format = cli.format;
    let command = match cli.command {
        Commands::Config(args) => {
            commands::config::run(&config, args, format);
            return Ok(());
        }
        command => command,
    };

    let db_path = cli.database.unwrap_or_else(|| config.database.clone());
    ensure_parent_dir(&db_path)?;
    let db = DatabaseConn::open_path(&db_path)?;

    match command {
        Commands::CreateTable(args) => commands::table::run(&db, args),
        Commands::Insert(args) => commands::insert::run(&db, args),
        Commands::Update(args) => commands::update::run(&db, args),
        Commands::Select(args) => commands::select::run_select(&db, args, format),
        Commands::Delete(args) => commands::delete::run(&db, args),
        Commands::Query(args) => commands::select::run_query(&db, args, format),
        Commands::Config(_) => Ok(()),
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

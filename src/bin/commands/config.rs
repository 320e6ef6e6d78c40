use clap::Args;
use serde::Serialize;
use sqlite_utils::{DatabaseConn, OutputFormat, SqliteUtilsConfig};
use std::path::Path;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also list the tables in the configured database
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    database: String,
    database_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tables: Option<Vec<String>>,
}

fn list_tables(path: &str) -> Option<Vec<String>> {
    let db = DatabaseConn::open_path(path).ok()?;
    let mut tables = Vec::new();
    db.executor()
        .select_sql(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
            |row| {
                tables.push(row.get::<_, String>(0)?);
                Ok(())
            },
        )
        .ok()?;
    Some(tables)
}

pub fn run(config: &SqliteUtilsConfig, args: ConfigArgs, output_format: OutputFormat) {
    let ConfigArgs { verbose } = args;

    let exists = Path::new(&config.database).exists();
    let info = ConfigInfo {
        config_file: SqliteUtilsConfig::config_file_path(),
        database: config.database.clone(),
        database_exists: exists,
        database_size_bytes: if exists {
            std::fs::metadata(&config.database).ok().map(|m| m.len())
        } else {
            None
        },
        log_file: config.log_file.clone(),
        tables: if verbose && exists {
            list_tables(&config.database)
        } else {
            None
        },
    };

    match output_format {
        OutputFormat::Json | OutputFormat::JsonLine => match serde_json::to_string(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
        OutputFormat::JsonPretty => match serde_json::to_string_pretty(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize to JSON: {}", e),
        },
        _ => {
            println!("Config File:        {}", info.config_file);
            println!("{}", config.summary());
            if let Some(tables) = &info.tables {
                println!("Tables:             {}", tables.join(", "));
            }
        }
    }
}

use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

pub struct SqliteUtilsConfig {
    /// Path to the SQLite database file used when none is given on the command line
    pub database: String,

    /// Optional file that diagnostic logs are written to
    pub log_file: Option<String>,
}

const EMPTY_CONFIG: &str = r#"### sqlite-utils configuration file

### database file used by default
# database = "~/.sqlite-utils/sqlite-utils.sqlite3"

### write diagnostic logs to this file instead of stderr
# log_file = "~/.sqlite-utils/sqlite-utils.log"
"#;

fn home_dir() -> String {
    dirs::home_dir()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

impl Default for SqliteUtilsConfig {
    fn default() -> Self {
        Self {
            database: format!("{}/.sqlite-utils/sqlite-utils.sqlite3", home_dir()),
            log_file: None,
        }
    }
}

impl SqliteUtilsConfig {
    /// Function to create and initialize a new configuration
    ///
    /// With no path, `$HOME/.sqlite-utils/sqlite-utils.toml` is used. A missing
    /// configuration file is created from a commented template.
    pub fn new(path: &Option<String>) -> Result<SqliteUtilsConfig> {
        let config_file = match path {
            Some(p) => p.clone(),
            None => {
                let dir = format!("{}/.sqlite-utils", home_dir());
                std::fs::create_dir_all(dir.as_str())
                    .map_err(|e| anyhow!("Unable to create sqlite-utils directory: {}", e))?;
                format!("{}/sqlite-utils.toml", dir)
            }
        };
        Self::load(&config_file)
    }

    /// Load configuration from a TOML file plus `SQLITE_UTILS_*` environment variables
    pub fn load(config_file: &str) -> Result<SqliteUtilsConfig> {
        let mut builder = Config::builder();

        if Path::new(config_file).exists() {
            builder = builder.add_source(
                config::File::with_name(config_file).format(config::FileFormat::Toml),
            );
        } else {
            std::fs::write(config_file, EMPTY_CONFIG)
                .map_err(|e| anyhow!("Unable to create config file {}: {}", config_file, e))?;
        }

        // E.g., `SQLITE_UTILS_DATABASE=/tmp/x.db sqlite-utils query ...`
        builder = builder.add_source(config::Environment::with_prefix("SQLITE_UTILS"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let defaults = SqliteUtilsConfig::default();
        let database = config
            .get("database")
            .map(|p| expand_home(p))
            .unwrap_or(defaults.database);
        let log_file = config.get("log_file").map(|p| expand_home(p));

        Ok(SqliteUtilsConfig { database, log_file })
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Database:           {}", self.database)];
        if Path::new(&self.database).exists() {
            if let Ok(meta) = std::fs::metadata(&self.database) {
                lines.push(format!("Database Size:      {}", format_size(meta.len())));
            }
        } else {
            lines.push("Database Size:      (not created yet)".to_string());
        }
        lines.push(format!(
            "Log File:           {}",
            self.log_file.as_deref().unwrap_or("(stderr, with --debug)")
        ));
        lines.join("\n")
    }

    /// Get the default config file path
    pub fn config_file_path() -> String {
        format!("{}/.sqlite-utils/sqlite-utils.toml", home_dir())
    }
}

fn expand_home(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home_dir(), rest),
        None => path.to_string(),
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SqliteUtilsConfig::default();
        assert!(config.database.ends_with("/.sqlite-utils/sqlite-utils.sqlite3"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlite-utils.toml");
        let path_str = path.to_str().unwrap();

        let config = SqliteUtilsConfig::load(path_str).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), EMPTY_CONFIG);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sqlite-utils.toml");
        std::fs::write(
            &path,
            "database = \"/data/tests.db\"\nlog_file = \"~/sqlite-utils.log\"\n",
        )
        .unwrap();

        let config = SqliteUtilsConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.database, "/data/tests.db");
        assert_eq!(
            config.log_file,
            Some(format!("{}/sqlite-utils.log", home_dir()))
        );
    }

    #[test]
    fn test_summary() {
        let config = SqliteUtilsConfig {
            database: "/nonexistent/tests.db".to_string(),
            log_file: Some("/tmp/sqlite-utils.log".to_string()),
        };
        let summary = config.summary();
        assert!(summary.contains("/nonexistent/tests.db"));
        assert!(summary.contains("(not created yet)"));
        assert!(summary.contains("/tmp/sqlite-utils.log"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1048576), "1.00 MB");
        assert_eq!(format_size(1073741824), "1.00 GB");
    }
}

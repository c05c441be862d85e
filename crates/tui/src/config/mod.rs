use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// JSON file backing the local key-value store (session user lives here).
    pub storage_path: String,
    pub log_file: String,
    pub log_level: String,
    pub toast_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            storage_path: "config/local_storage.json".to_string(),
            log_file: "logs/lancamentos_tui.log".to_string(),
            log_level: "info".to_string(),
            toast_seconds: 4,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lancamentos_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the local storage file.
    #[arg(long)]
    storage_path: Option<String>,
    /// Override the log file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (tracing env-filter syntax).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("LANCAMENTOS_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(storage_path) = args.storage_path {
        settings.storage_path = storage_path;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

//! Server configuration
//!
//! Every flag has an environment fallback so the server can be configured
//! entirely through `GBSERVER_*` variables.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gbserver_core::logging_facility::Profile;
use gbserver_core::ops::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, debug level
    Development,
    /// JSON lines, info level
    Production,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Development => Profile::Development,
            LogFormat::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gbserver")]
#[command(about = "In-memory mock of a code-hosting management API", long_about = None)]
#[command(version)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, env = "GBSERVER_PORT", default_value_t = 9090)]
    pub port: u16,

    /// Base URL used in branch, commit and pull request URLs
    #[arg(long, env = "GBSERVER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seed file (YAML, schema version 0); the built-in fixture when absent
    #[arg(long, env = "GBSERVER_SEED")]
    pub seed: Option<PathBuf>,

    /// Requests per second per client; 0 disables throttling
    #[arg(long, env = "GBSERVER_RATE_LIMIT", default_value_t = 10)]
    pub rate_limit: u32,

    #[arg(long, env = "GBSERVER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Development)]
    pub log_format: LogFormat,
}

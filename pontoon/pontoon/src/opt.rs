use crate::LogFormat;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone)]
#[structopt(name = "pontoon")]
pub struct PontoonOpt {
    /// The hostname or IP the proxy should bind to.
    #[structopt(long, short = "H", default_value = "127.0.0.1")]
    pub host: String,

    /// The port the proxy should bind to.
    #[structopt(long, short, default_value = "4466", env = "PORT")]
    pub port: u16,

    /// Connection string of the backing PostgreSQL database.
    #[structopt(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Path to the collection schema descriptor file.
    #[structopt(long, env = "SCHEMA_PATH", parse(from_os_str))]
    pub schema: Option<PathBuf>,

    /// Maximum number of pooled database connections.
    #[structopt(long, default_value = "10")]
    pub max_connections: u64,

    /// Log output format: `text` or `json`.
    #[structopt(long = "log-format", env = "LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Log executed statements and their parameters.
    #[structopt(long = "log-queries")]
    pub log_queries: bool,

    #[structopt(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(Debug, StructOpt, Clone)]
pub enum Subcommand {
    /// Parse and validate the collection schema file, then print it.
    ValidateSchema,
}

impl PontoonOpt {
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

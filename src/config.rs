use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// PIX limit service: manages per-account PIX limits over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "PIX_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PIX_DB_PATH")]
    pub db_path: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogConfig,

    /// Origins allowed to call the API from a browser (comma-separated).
    #[arg(long = "cors-origin", env = "PIX_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogConfig {
    /// Default log filter; `RUST_LOG` takes precedence when set.
    #[arg(long, env = "PIX_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long, env = "PIX_LOG_JSON")]
    pub log_json: bool,
}

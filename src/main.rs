use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pixlimit::application::service::PixLimitService;
use pixlimit::config::Config;
use pixlimit::infrastructure::open_store;
use pixlimit::interfaces::http;
use pixlimit::logging::init_logging;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config.log);

    // In-memory unless a database path is configured
    let store = open_store(config.db_path.as_deref()).into_diagnostic()?;
    let service = Arc::new(PixLimitService::new(store));
    let app = http::router(service, &config.cors_origins);

    let listener = TcpListener::bind(config.bind).await.into_diagnostic()?;
    http::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}

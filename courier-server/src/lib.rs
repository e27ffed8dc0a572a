//! Library entrypoint for courier-server so tests and other binaries can run
//! the service without shelling out.

pub mod cli;
pub mod conditional;
pub mod config;
pub mod error;
pub mod handlers;
pub mod negotiate;
pub mod respond;
pub mod routes;
pub mod seed;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::routes::AppState;

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Run the daemon using CLI args (parsed by the caller).
pub async fn run_with_cli(cli: cli::Cli) -> Result<()> {
    init_tracing(cli.verbose)?;
    let config = ServerConfig::from_cli(&cli)?;

    let state = AppState::new(config.page_size);
    if config.seed_demo {
        seed::seed_demo(&state.stores);
    }
    serve(config, state).await
}

/// Bind and serve until shutdown.
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let app = routes::router(state);
    info!(addr = %config.listen_addr, "courier listening");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

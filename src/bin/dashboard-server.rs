//! CryptoVault Dashboard Server
//!
//! Serves the dashboard screens rendered from the analysis backend.
//! Stateless: every request fetches fresh data, so it can be horizontally scaled.

use cryptovault::config::Config;
use cryptovault::core::http::start_server;
use cryptovault::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env();
    let env = cryptovault::config::get_environment();
    info!("Starting CryptoVault Dashboard Server");
    info!(environment = %env, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(style = ?config.render.style, change_source = ?config.render.change_source, "Rendering");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}

//! Candy registry server.
//!
//! ```text
//!     Client ──▶ listener ──▶ middleware ──▶ /candies ──▶ CandyStore
//!                             (request id,    /admin (basic auth)
//!                              trace, timeout,
//!                              metrics)
//! ```
//!
//! Configuration comes from an optional TOML file plus the environment;
//! `ADMIN_PASSWORD` is required and startup aborts without it.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use candy_registry::config::load_config;
use candy_registry::lifecycle::{signals, Shutdown};
use candy_registry::observability::{logging, metrics};
use candy_registry::HttpServer;

#[derive(Parser)]
#[command(name = "candy-registry")]
#[command(about = "In-memory candy registry over HTTP", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CANDY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("candy-registry v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

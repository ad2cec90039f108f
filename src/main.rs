//! Retake proxy
//!
//! Forwards the site's data requests to the Retake scoring service and adds
//! the CORS headers a browser needs to read the answers.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌─────────────────────────────────────────────┐
//!                  │                RETAKE PROXY                 │
//!                  │                                             │
//!   Browser / CLI  │  ┌────────┐    ┌───────────┐    ┌────────┐  │
//!   ───────────────┼─▶│  http  │───▶│  /api/*   │───▶│upstream│──┼──▶ api.retaketech.com
//!                  │  │ server │    ├───────────┤    │ client │  │    static.retaketech.com
//!                  │  │        │───▶│ functions │───▶│        │  │
//!                  │  └────────┘    └───────────┘    └────────┘  │
//!                  │                                             │
//!                  │  config (toml, hot reload)   observability  │
//!                  │  lifecycle (signals, graceful shutdown)     │
//!                  └─────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use retake_proxy::config::{load_config, ConfigWatcher, ProxyConfig};
use retake_proxy::http::HttpServer;
use retake_proxy::lifecycle::{forward_signals, Shutdown};
use retake_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "retake-proxy")]
#[command(about = "CORS proxy for the Retake scoring service", long_about = None)]
struct Args {
    /// TOML configuration file; watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "retake-proxy starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base_url = %config.upstream.api_base_url,
        static_base_url = %config.upstream.static_base_url,
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

    // The watcher handle must outlive the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path, &config);
            (Some(watcher.run()?), rx)
        }
        None => {
            let (_, rx) = mpsc::unbounded_channel();
            (None, rx)
        }
    };

    let shutdown = Shutdown::new();
    forward_signals(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

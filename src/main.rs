//! Lambda Gateway (v1)
//!
//! Exposes a Lambda-style function backend over plain HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                    LAMBDA GATEWAY                    │
//!                    │                                                      │
//!  Client Request    │  ┌─────────┐    ┌───────────┐    ┌──────────────┐    │
//!  ──────────────────┼─▶│  http   │───▶│  request  │───▶│    invoke    │────┼──▶ Function
//!                    │  │ server  │    │ translate │    │ client + rpc │    │    Backend
//!                    │  └─────────┘    └───────────┘    └──────┬───────┘    │
//!                    │                                         │            │
//!  Client Response   │  ┌─────────┐                            │            │
//!  ◀─────────────────┼──│response │◀───────────────────────────┘            │
//!                    │  │ mapper  │                                         │
//!                    │  └─────────┘                                         │
//!                    │                                                      │
//!                    │  config · observability · lifecycle                  │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use lambda_gateway::config::{self, ConfigError};
use lambda_gateway::lifecycle::{signals, Shutdown};
use lambda_gateway::observability::{logging, metrics};
use lambda_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "lambda-gateway")]
#[command(about = "Serve a Lambda-style function backend over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Function backend address (overrides LAMBDA_HOST).
    #[arg(long)]
    lambda_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::GatewayConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!("lambda-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    config::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(host) = cli.lambda_host {
        config.backend.address = host;
    }
    config::validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::info!(
        lambda_address = %config.backend.address,
        port = config.listener.port,
        invoke_timeout_secs = ?config.backend.invoke_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        // Validated above.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

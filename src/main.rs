//! Service registry server.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               SERVICE REGISTRY                │
//!                      │                                               │
//!  register / remove   │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!  ────────────────────┼─▶│  http   │───▶│ handlers │───▶│         │  │
//!  query               │  │ server  │    └──────────┘    │  store  │  │
//!  ◀───────────────────┼──│         │◀───────────────────│ (RwLock)│  │
//!                      │  └─────────┘                    │         │  │
//!                      │                                 └────▲────┘  │
//!                      │  ┌──────────────────────┐  snapshot  │ put   │
//!                      │  │   health checker     │────────────┘       │
//!                      │  │ tick → fan-out/join  │                    │
//!                      │  └──────────┬───────────┘                    │
//!                      └─────────────┼────────────────────────────────┘
//!                                    │ GET /health
//!                                    ▼
//!                             registered hosts
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use service_registry::config::load_config;
use service_registry::lifecycle::{signals, Shutdown};
use service_registry::observability::{logging, metrics};
use service_registry::RegistryServer;

#[derive(Parser)]
#[command(name = "service-registry")]
#[command(about = "Service registry with active health checking", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "REGISTRY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        check_interval_ms = config.health_check.interval_ms,
        check_timeout_ms = config.health_check.timeout_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    tokio::spawn(signals::wait_for_signal(shutdown.clone()));

    RegistryServer::new(config).run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

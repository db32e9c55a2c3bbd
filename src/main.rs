//! Text board server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                   TEXT BOARD                     │
//!                    │                                                  │
//!   GET /  ──────────┼─▶ http ──▶ session ──▶ board ──▶ store.read_all  │
//!                    │                          │                       │
//!   ◀── HTML page ───┼──────────────────────── render                   │
//!                    │                                                  │
//!   POST / ──────────┼─▶ http ──▶ session ──▶ board ──▶ store.append    │
//!                    │            (lock)   csrf/rate/len   (flock)      │
//!   ◀── 303 / ───────┼───────────────────────────┘                      │
//!                    │                                                  │
//!                    │  config · observability · security · lifecycle   │
//!                    └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use textboard::config::load_or_default;
use textboard::lifecycle::{bind_listener, preflight, signals, Shutdown};
use textboard::observability::{self, metrics};
use textboard::HttpServer;

#[derive(Parser)]
#[command(name = "textboard")]
#[command(about = "Anonymous text board server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;

    observability::init_logging(&config.observability)?;

    tracing::info!("textboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_posts = config.board.max_posts,
        max_message_length = config.board.max_message_length,
        rate_limit_secs = config.board.rate_limit_secs,
        "Configuration loaded"
    );

    let store = preflight(&config).map_err(|e| {
        tracing::error!(error = %e, "Environment precondition failed");
        e
    })?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = bind_listener(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to bind listener");
        e
    })?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

//! # Stockroom Server
//!
//! One process, two front ends, one store.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, so the menu owns stdout)
//! 2. Load configuration (defaults → TOML → `STOCKROOM_*` env)
//! 3. Open the SQLite pool and run migrations
//! 4. Start the HTTP server in the background
//! 5. Run the console menu in the foreground
//! 6. On menu exit, end of input, Ctrl+C or SIGTERM: stop HTTP, close pool
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tokio runtime                                                          │
//! │                                                                         │
//! │   ┌────────────────────┐        ┌────────────────────┐                 │
//! │   │ axum::serve task   │        │ console (main task)│                 │
//! │   │ GET/POST/PUT/...   │        │ 1/2/3/4/0          │                 │
//! │   └─────────┬──────────┘        └─────────┬──────────┘                 │
//! │             └──────────┬──────────────────┘                            │
//! │                        ▼                                                │
//! │            Arc<dyn ProductStore> (SqliteProductStore)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod http;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockroom_core::ProductStore;
use stockroom_db::{Database, DbConfig, SqliteProductStore};

use crate::config::ServerConfig;
use crate::console::Console;
use crate::http::HttpServer;

/// Why the process is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// `0` was chosen or stdin reached end of input.
    ConsoleExit,
    /// Ctrl+C or SIGTERM.
    Signal,
}

/// Initializes tracing.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockroom=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the server until the console exits or a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> anyhow::Result<ShutdownReason> {
    info!(
        db = %config.database.path.display(),
        addr = %config.http.socket_addr(),
        console = config.console.enabled,
        "Starting Stockroom"
    );

    let db_config =
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections);
    let db = Database::new(db_config)
        .await
        .with_context(|| format!("opening database {}", config.database.path.display()))?;

    let store: Arc<dyn ProductStore> = Arc::new(SqliteProductStore::new(&db));

    let http = HttpServer::new(config.http.socket_addr(), Arc::clone(&store))
        .start()
        .await
        .with_context(|| format!("binding HTTP listener on {}", config.http.socket_addr()))?;
    info!(
        "API online at http://{}/api/v1/products",
        http.local_addr()
    );

    let reason = if config.console.enabled {
        let mut console = Console::new(
            Arc::clone(&store),
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        );

        tokio::select! {
            result = console.run() => {
                if let Err(e) = result {
                    warn!(error = %e, "Console stopped on an I/O error");
                }
                ShutdownReason::ConsoleExit
            }
            _ = shutdown_signal() => ShutdownReason::Signal,
        }
    } else {
        shutdown_signal().await;
        ShutdownReason::Signal
    };

    info!(?reason, "Shutting down");
    http.shutdown().await;
    db.close().await;
    info!("Shutdown complete");

    Ok(reason)
}

/// Completes on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

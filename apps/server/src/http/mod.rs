//! # HTTP Front End
//!
//! axum router over the shared [`ProductStore`].
//!
//! ## Lifecycle
//! ```text
//! HttpServer::new(addr, store)
//!      │
//!      ▼
//! start() ── bind listener ── spawn axum::serve ──► HttpHandle
//!                                  │                    │
//!                                  │                    │ shutdown()
//!                                  ▼                    ▼
//!                           in-flight requests finish, task ends
//! ```

pub mod dto;
pub mod products;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use stockroom_core::ProductStore;

use crate::error::ApiError;

/// Collection path; item paths append `/{id}`.
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

/// Builds the full router.
pub fn router(store: Arc<dyn ProductStore>) -> Router {
    Router::new()
        .route(
            PRODUCTS_PATH,
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/v1/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .patch(products::patch_product)
                .delete(products::delete_product),
        )
        .route("/health", get(health_handler))
        .with_state(AppState { store })
}

/// Health check endpoint.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            ApiError::unavailable("Store is not available").into_response()
        }
    }
}

/// HTTP server bound to one address.
pub struct HttpServer {
    addr: SocketAddr,
    store: Arc<dyn ProductStore>,
}

/// Handle for a running server.
pub struct HttpHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl HttpServer {
    pub fn new(addr: SocketAddr, store: Arc<dyn ProductStore>) -> Self {
        HttpServer { addr, store }
    }

    /// Binds the listener and starts serving in a background task.
    ///
    /// Binding happens before this returns, so a port clash is reported to
    /// the caller rather than logged from the task.
    pub async fn start(self) -> std::io::Result<HttpHandle> {
        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        let app = router(self.store);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        info!(addr = %local_addr, "HTTP server listening");

        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also means shut down
                    let _ = shutdown_rx.await;
                    info!("HTTP server shutting down");
                })
                .await;

            if let Err(e) = result {
                error!(error = %e, "HTTP server stopped with an error");
            }
        });

        Ok(HttpHandle {
            local_addr,
            shutdown_tx,
            task,
        })
    }
}

impl HttpHandle {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            error!(error = %e, "HTTP server task panicked");
        }
    }
}

//! HTTP service layer for faqd
//!
//! Maps the FAQ store and the realtime store onto the service's HTTP
//! endpoints. Each store sits behind a single async mutex guarding the
//! in-memory state together with its persisted files, so requests against a
//! store are handled to completion, file writes included, before the next
//! one observes it.

mod config;
mod error;
mod routes;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::router;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

use faqd_store::{FaqStore, RealtimeStore};

/// Shared state handed to every request handler
pub struct AppState {
    pub faq: Mutex<FaqStore>,
    pub realtime: Mutex<RealtimeStore>,
}

impl AppState {
    pub fn new(faq: FaqStore, realtime: RealtimeStore) -> Self {
        Self {
            faq: Mutex::new(faq),
            realtime: Mutex::new(realtime),
        }
    }
}

/// Serve the API until ctrl-c.
pub async fn serve(state: Arc<AppState>, bind: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}

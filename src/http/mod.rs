//! HTTP API server for the token broker
//!
//! - POST /api/get-access-token - Exchange the server-held key for a session token
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use tracing::info;

/// Bind `addr` and serve the router until the process is stopped
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Token broker listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .await
        .context("HTTP server error")
}

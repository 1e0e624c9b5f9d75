//! HTTP JSON API for SkyPlan (axum).
//!
//! Serves one planning session: the three stages, downloads, and a catalog search
//! that needs no completion service. Default address `127.0.0.1:8080`.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`].

mod app;
mod error;
mod handlers;

use std::sync::Arc;

use skyplan::Planner;
use tokio::net::TcpListener;
use tracing::{info, warn};

use app::{router, AppState};

const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Serves on an existing listener until the task is dropped. Tests bind `127.0.0.1:0`
/// and pass the listener here.
pub async fn run_serve_on_listener(
    listener: TcpListener,
    planner: Planner,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = listener.local_addr()?;
    if !planner.has_credential() {
        warn!("{}", skyplan::MISSING_CREDENTIAL_WARNING);
    }
    let state = Arc::new(AppState::new(planner));
    info!(session = %state.session_id, "HTTP server listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Binds `addr` (default `127.0.0.1:8080`) and serves.
pub async fn run_serve(
    addr: Option<&str>,
    planner: Planner,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = addr.unwrap_or(DEFAULT_ADDR);
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, planner).await
}

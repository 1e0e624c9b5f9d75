//! Axum app: shared state and router.
//!
//! One process serves one planning session. The session's [`PlanStore`] sits behind a
//! tokio mutex; mutating handlers take it with `try_lock` so a second submission while
//! a completion call is outstanding is answered with 409 instead of queueing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use skyplan::{PlanStore, Planner};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::handlers;

/// Shared state for the HTTP server.
pub(crate) struct AppState {
    pub(crate) planner: Planner,
    pub(crate) store: Mutex<PlanStore>,
    pub(crate) session_id: Uuid,
    pub(crate) started_at: DateTime<Utc>,
}

impl AppState {
    pub(crate) fn new(planner: Planner) -> Self {
        Self {
            planner,
            store: Mutex::new(PlanStore::new()),
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    /// Store guard for a mutating action; fails fast when another action holds it.
    pub(crate) fn store_for_write(&self) -> ApiResult<MutexGuard<'_, PlanStore>> {
        self.store.try_lock().map_err(|_| ApiError::Busy)
    }
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route(
            "/api/usecase/draft",
            post(handlers::generate_draft)
                .get(handlers::get_draft)
                .delete(handlers::clear_draft),
        )
        .route("/api/usecase/confirm", post(handlers::confirm_draft))
        .route(
            "/api/plan",
            get(handlers::get_plan).delete(handlers::clear_plan),
        )
        .route(
            "/api/configuration/draft",
            post(handlers::generate_configuration),
        )
        .route(
            "/api/configuration/confirm",
            post(handlers::confirm_configuration),
        )
        .route(
            "/api/configuration",
            get(handlers::get_configuration).delete(handlers::clear_configuration),
        )
        .route("/api/download/:kind", get(handlers::download))
        .route("/api/catalog/search", get(handlers::catalog_search))
        .with_state(state)
}

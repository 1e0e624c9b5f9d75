//! Route handlers. Each returns JSON or an [`ApiError`].

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use skyplan::{
    plan::{DEFAULT_RESOLUTION_M, DEFAULT_REVISIT_DAYS},
    render, search_scored, Artifact, ArtifactKind, Stage, MISSING_CREDENTIAL_WARNING,
};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

type AppStateRef = State<Arc<AppState>>;

#[derive(Serialize)]
pub(crate) struct StatusResponse {
    session_id: String,
    started_at: DateTime<Utc>,
    model: Option<String>,
    has_credential: bool,
    warning: Option<&'static str>,
    catalog_size: usize,
    busy: bool,
    /// `None` while an action holds the store.
    stages: Option<Vec<Stage>>,
}

/// Never waits on the store, so the credential warning stays reachable during a call.
pub(crate) async fn status(State(state): AppStateRef) -> Json<StatusResponse> {
    let stages = state.store.try_lock().ok().map(|store| {
        Stage::ALL
            .into_iter()
            .filter(|s| store.contains(*s))
            .collect::<Vec<_>>()
    });
    let has_credential = state.planner.has_credential();
    Json(StatusResponse {
        session_id: state.session_id.to_string(),
        started_at: state.started_at,
        model: state.planner.model().map(str::to_string),
        has_credential,
        warning: (!has_credential).then_some(MISSING_CREDENTIAL_WARNING),
        catalog_size: state.planner.catalog().len(),
        busy: stages.is_none(),
        stages,
    })
}

#[derive(Deserialize)]
pub(crate) struct DraftRequest {
    text: String,
}

pub(crate) async fn generate_draft(
    State(state): AppStateRef,
    payload: Result<Json<DraftRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload?;
    if req.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".into()));
    }
    let mut store = state.store_for_write()?;
    let draft = state.planner.generate_draft(&mut store, &req.text).await?;
    Ok(Json(json!({
        "draft": draft,
        "markdown": render::draft_markdown(&draft),
    })))
}

pub(crate) async fn get_draft(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let store = state.store.lock().await;
    let entry = store
        .entry(Stage::UseCaseDraft)
        .ok_or(ApiError::NotFound("use-case draft"))?;
    let draft = store.draft().ok_or(ApiError::NotFound("use-case draft"))?;
    Ok(Json(json!({
        "draft": draft,
        "markdown": render::draft_markdown(draft),
        "updated_at": entry.updated_at,
    })))
}

pub(crate) async fn clear_draft(State(state): AppStateRef) -> ApiResult<StatusCode> {
    let mut store = state.store_for_write()?;
    state.planner.clear_draft(&mut store);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn confirm_draft(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let mut store = state.store_for_write()?;
    let plan = state.planner.confirm_draft(&mut store)?;
    Ok(Json(json!({
        "plan": plan,
        "markdown": render::final_plan_markdown(&plan),
    })))
}

pub(crate) async fn get_plan(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let store = state.store.lock().await;
    let entry = store
        .entry(Stage::FinalPlan)
        .ok_or(ApiError::NotFound("final plan"))?;
    let plan = store.final_plan().ok_or(ApiError::NotFound("final plan"))?;
    Ok(Json(json!({
        "plan": plan,
        "markdown": render::final_plan_markdown(plan),
        "updated_at": entry.updated_at,
    })))
}

pub(crate) async fn clear_plan(State(state): AppStateRef) -> ApiResult<StatusCode> {
    let mut store = state.store_for_write()?;
    state.planner.clear_final_plan(&mut store);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn generate_configuration(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let mut store = state.store_for_write()?;
    let configuration = state.planner.generate_configuration(&mut store).await?;
    Ok(Json(json!({
        "stage": Stage::ConfigurationDraft,
        "configuration": configuration,
        "markdown": render::configuration_markdown(&configuration),
    })))
}

pub(crate) async fn confirm_configuration(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let mut store = state.store_for_write()?;
    let configuration = state.planner.confirm_configuration(&mut store)?;
    Ok(Json(json!({
        "stage": Stage::ConfigurationConfirmed,
        "configuration": configuration,
        "markdown": render::configuration_markdown(&configuration),
    })))
}

pub(crate) async fn get_configuration(State(state): AppStateRef) -> ApiResult<Json<Value>> {
    let store = state.store.lock().await;
    let (stage, configuration) = store
        .configuration()
        .ok_or(ApiError::NotFound("configuration"))?;
    let updated_at = store.entry(stage).map(|e| e.updated_at);
    Ok(Json(json!({
        "stage": stage,
        "configuration": configuration,
        "markdown": render::configuration_markdown(configuration),
        "updated_at": updated_at,
    })))
}

pub(crate) async fn clear_configuration(State(state): AppStateRef) -> ApiResult<StatusCode> {
    let mut store = state.store_for_write()?;
    state.planner.clear_configuration(&mut store);
    Ok(StatusCode::NO_CONTENT)
}

/// `attachment` disposition with an ASCII fallback and the UTF-8 name per RFC 6266.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' { c } else { '_' })
        .collect();
    let encoded: String = url::form_urlencoded::byte_serialize(filename.as_bytes()).collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii, encoded
    )
}

pub(crate) async fn download(
    State(state): AppStateRef,
    Path(kind): Path<String>,
) -> ApiResult<Response> {
    let kind = ArtifactKind::from_segment(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown artifact: {}", kind)))?;
    let store = state.store.lock().await;
    let artifact = match kind {
        ArtifactKind::Draft => {
            let draft = store.draft().ok_or(ApiError::NotFound("use-case draft"))?;
            Artifact::new(kind, &draft.usecase_name, draft)?
        }
        ArtifactKind::Plan => {
            let plan = store.final_plan().ok_or(ApiError::NotFound("final plan"))?;
            Artifact::new(kind, &plan.usecase_name, plan)?
        }
        ArtifactKind::Configuration => {
            let (_, configuration) = store
                .configuration()
                .ok_or(ApiError::NotFound("configuration"))?;
            let name = store
                .final_plan()
                .map(|p| p.usecase_name.as_str())
                .or_else(|| store.draft().map(|d| d.usecase_name.as_str()))
                .unwrap_or_default();
            Artifact::new(kind, name, configuration)?
        }
    };
    Ok((
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&artifact.filename),
            ),
        ],
        artifact.body,
    )
        .into_response())
}

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    bands: Option<String>,
    resolution: Option<f64>,
    revisit: Option<f64>,
}

pub(crate) async fn catalog_search(
    State(state): AppStateRef,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(q) = query?;
    let bands: Vec<String> = q
        .bands
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    let resolution = q.resolution.unwrap_or(DEFAULT_RESOLUTION_M);
    let revisit = q.revisit.unwrap_or(DEFAULT_REVISIT_DAYS);
    let results = search_scored(
        bands.as_slice(),
        resolution,
        revisit,
        state.planner.catalog().records(),
        state.planner.match_options(),
    );
    Ok(Json(json!({
        "bands": bands,
        "resolution_m": resolution,
        "revisit_days": revisit,
        "results": results,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_has_ascii_fallback_and_utf8_name() {
        let v = content_disposition("洪水_draft.json");
        assert!(v.starts_with("attachment; filename=\"_"));
        assert!(v.contains("filename*=UTF-8''%E6%B4%AA%E6%B0%B4_draft.json"));
    }
}

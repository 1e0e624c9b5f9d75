//! HTTP error mapping: every failure becomes `{error, kind, raw?}` JSON.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyplan::PlanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("another action is still running for this session")]
    Busy,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Plan(e) => match e {
                PlanError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
                PlanError::Transport(_) => StatusCode::BAD_GATEWAY,
                PlanError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                PlanError::MissingPrerequisite(_) => StatusCode::CONFLICT,
                PlanError::StageMismatch { .. } | PlanError::Serialize(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Busy => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Plan(e) => e.kind(),
            ApiError::NotFound(_) => "not_found",
            ApiError::Busy => "busy",
            ApiError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        if let ApiError::Plan(e) = &self {
            if let Some(raw) = e.raw_output() {
                body["raw"] = json!(raw);
            }
        }
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use skyplan::Stage;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            ApiError::from(PlanError::MissingCredential).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(PlanError::Transport("x".into())).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(PlanError::extraction("bad", "raw")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(PlanError::MissingPrerequisite(Stage::FinalPlan)).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::Busy.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound("draft").kind(), "not_found");
    }
}

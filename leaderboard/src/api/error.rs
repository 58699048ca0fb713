use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::service::ServiceError;
use crate::views;

/// Failure of a JSON route. Every variant renders as the same
/// `{error, code, description}` envelope; internal causes stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(_) | ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the failure as an HTML page instead of JSON.
    pub fn into_page(self) -> Response {
        let status = self.log();
        (status, Html(views::error_page(status))).into_response()
    }

    fn log(&self) -> StatusCode {
        let status = self.status();
        match self {
            ApiError::Service(_) | ApiError::Join(_) => error!(error = %self, "request failed"),
            ApiError::BadRequest(reason) => debug!(%reason, "rejected malformed request"),
            _ => {}
        }
        status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.log();
        (status, Json(ErrorEnvelope::new(status))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    error: bool,
    code: u16,
    description: &'static str,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode) -> Self {
        Self {
            error: true,
            code: status.as_u16(),
            description: status.canonical_reason().unwrap_or("Unknown Error"),
        }
    }
}

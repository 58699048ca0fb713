//! HTTP surface: JSON API under `/api`, HTML pages everywhere else.
//!
//! | Method | Path          | Auth   |
//! |--------|---------------|--------|
//! | GET    | `/`           | none   |
//! | GET    | `/{token}`    | path   |
//! | GET    | `/api[/]`     | none   |
//! | GET    | `/api/{n}`    | none   |
//! | PUT    | `/api`        | bearer |
//! | DELETE | `/api/{id}`   | bearer |
//!
//! Anything else under `/api` gets a JSON 404, the rest an HTML 404.

use std::sync::Arc;

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::service::{Leaderboard, ServiceError};
use crate::views;

mod auth;
mod error;
mod routes;

pub use auth::Authorized;
pub use error::{ApiError, ErrorEnvelope};
pub use routes::SubmitRequest;

/// Number of scores `GET /api` returns when no amount is given.
pub const DEFAULT_API_AMOUNT: i64 = 50;

/// Runtime knobs for the HTTP layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Shared secret for mutating routes and the review page.
    pub token: String,
    /// Default amount for `GET /api`; negative means all.
    pub api_amount: i64,
    /// Amount shown on the HTML pages; negative means all.
    pub page_amount: i64,
}

impl ApiConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_amount: DEFAULT_API_AMOUNT,
            page_amount: -1,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    leaderboard: Leaderboard,
    config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(leaderboard: Leaderboard, config: ApiConfig) -> Self {
        Self {
            leaderboard,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Runs a leaderboard operation on the blocking pool; store calls hit
    /// SQLite synchronously.
    async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Leaderboard) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let leaderboard = self.leaderboard.clone();
        let result = tokio::task::spawn_blocking(move || op(&leaderboard)).await?;
        Ok(result?)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).fallback(not_found))
        .route("/:token", get(routes::review).fallback(not_found))
        .route(
            "/api",
            get(routes::list_scores)
                .put(routes::submit_score)
                .fallback(not_found),
        )
        .route("/api/", get(routes::list_scores).fallback(not_found))
        .route(
            "/api/:target",
            get(routes::list_amount)
                .delete(routes::remove_score)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

async fn not_found(uri: Uri) -> Response {
    if is_api_path(uri.path()) {
        ApiError::NotFound.into_response()
    } else {
        page_not_found()
    }
}

fn page_not_found() -> Response {
    let status = StatusCode::NOT_FOUND;
    (status, Html(views::error_page(status))).into_response()
}

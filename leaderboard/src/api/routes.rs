use axum::async_trait;
use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{page_not_found, ApiError, AppState, Authorized};
use crate::rank::RankedScore;
use crate::service::limit_from_amount;
use crate::store::ScoreId;
use crate::views;

/// Body of `PUT /api`, sent either as JSON or as an urlencoded form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitRequest {
    #[serde(default)]
    pub username: Option<String>,
    pub score: i64,
}

#[async_trait]
impl<S> FromRequest<S> for SubmitRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(request) = Form::<SubmitRequest>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            Ok(request)
        } else {
            let Json(request) = Json::<SubmitRequest>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            Ok(request)
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ScoresEnvelope {
    error: bool,
    scores: Vec<RankedScore>,
    count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct PositionEnvelope {
    error: bool,
    position: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct Ack {
    error: bool,
}

pub(super) async fn index(State(state): State<AppState>) -> Response {
    render_page(&state, false).await
}

/// Leaderboard in review mode, reachable only by putting the shared token in
/// the path. Any other single-segment path is a 404.
pub(super) async fn review(
    State(state): State<AppState>,
    token: Result<Path<String>, PathRejection>,
) -> Response {
    match token {
        Ok(Path(token)) if token == state.config().token => {}
        _ => return page_not_found(),
    }
    render_page(&state, true).await
}

async fn render_page(state: &AppState, review: bool) -> Response {
    let limit = limit_from_amount(state.config().page_amount);
    match state.run(move |board| board.list_scores(limit)).await {
        Ok(scores) => Html(views::leaderboard_page(&scores, review)).into_response(),
        Err(err) => err.into_page(),
    }
}

pub(super) async fn list_scores(State(state): State<AppState>) -> Result<Json<ScoresEnvelope>, ApiError> {
    let amount = state.config().api_amount;
    list(&state, amount).await
}

pub(super) async fn list_amount(
    State(state): State<AppState>,
    amount: Result<Path<String>, PathRejection>,
) -> Result<Json<ScoresEnvelope>, ApiError> {
    let Path(amount) = amount.map_err(bad_path)?;
    let amount = amount
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("invalid amount {amount:?}")))?;
    list(&state, amount).await
}

async fn list(state: &AppState, amount: i64) -> Result<Json<ScoresEnvelope>, ApiError> {
    let limit = limit_from_amount(amount);
    let scores = state.run(move |board| board.list_scores(limit)).await?;
    Ok(Json(ScoresEnvelope {
        error: false,
        count: scores.len(),
        scores,
    }))
}

pub(super) async fn submit_score(
    _: Authorized,
    State(state): State<AppState>,
    request: SubmitRequest,
) -> Result<Json<PositionEnvelope>, ApiError> {
    let username = request.username.unwrap_or_default();
    let entry = state
        .run(move |board| board.submit_score(&username, request.score))
        .await?;
    Ok(Json(PositionEnvelope {
        error: false,
        position: entry.rank,
    }))
}

pub(super) async fn remove_score(
    _: Authorized,
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Ack>, ApiError> {
    let Path(id) = id.map_err(bad_path)?;
    let id = id
        .parse::<ScoreId>()
        .map_err(|_| ApiError::BadRequest(format!("invalid score id {id:?}")))?;
    let removed = state
        .run(move |board| match board.get_score(id)? {
            Some(entry) => board.remove_score(entry.score.id).map(|()| Some(entry)),
            None => Ok(None),
        })
        .await?;
    match removed {
        Some(entry) => info!(id, username = %entry.score.username, points = entry.score.points, "score removed"),
        None => info!(id, "delete requested for unknown score"),
    }
    Ok(Json(Ack { error: false }))
}

fn bad_path(rejection: PathRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}

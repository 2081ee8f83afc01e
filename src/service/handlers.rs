use super::leaderboard::Leaderboard;
use super::protocol::*;
use crate::error::LeaderboardError;

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

pub fn router(board: Arc<Leaderboard>) -> Router {
    Router::new()
        .route(ENDPOINT_SCORE, post(handle_submit_score))
        .route(ENDPOINT_LEADERBOARD, get(handle_get_leaderboard))
        .route(&format!("{}/:username", ENDPOINT_RANK), get(handle_get_rank))
        .route(ENDPOINT_METADATA, get(handle_get_metadata))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(board))
}

fn error_response(context: &str, e: LeaderboardError) -> ApiError {
    let status = match &e {
        LeaderboardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        LeaderboardError::NotFound(_) => StatusCode::NOT_FOUND,
        LeaderboardError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        LeaderboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match &e {
        LeaderboardError::Internal(_) | LeaderboardError::Unavailable(_) => {
            tracing::error!("{} failed: {}", context, e);
        }
        _ => tracing::debug!("{} rejected: {}", context, e),
    }

    (
        status,
        Json(ErrorResponse {
            error: e.kind().to_string(),
            message: e.to_string(),
        }),
    )
}

pub async fn handle_submit_score(
    Extension(board): Extension<Arc<Leaderboard>>,
    Json(req): Json<SubmitScoreRequest>,
) -> ApiResult<UserRankResponse> {
    match board.submit_score(&req.username, req.score) {
        Ok(update) => Ok((StatusCode::OK, Json(update.into()))),
        Err(e) => Err(error_response("update_score", e)),
    }
}

pub async fn handle_get_leaderboard(
    Extension(board): Extension<Arc<Leaderboard>>,
    Query(params): Query<TopParams>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    match board.query_top(params.top) {
        Ok(entries) => Ok((
            StatusCode::OK,
            Json(entries.into_iter().map(LeaderboardEntry::from).collect()),
        )),
        Err(e) => Err(error_response("get_leaderboard", e)),
    }
}

pub async fn handle_get_rank(
    Extension(board): Extension<Arc<Leaderboard>>,
    Path(username): Path<String>,
) -> ApiResult<UserRankResponse> {
    match board.query_rank(&username) {
        Ok(update) => Ok((StatusCode::OK, Json(update.into()))),
        Err(e) => Err(error_response("get_user_rank", e)),
    }
}

pub async fn handle_get_metadata(
    Extension(board): Extension<Arc<Leaderboard>>,
) -> ApiResult<MetadataResponse> {
    match board.query_metadata() {
        Ok(snapshot) => Ok((StatusCode::OK, Json(MetadataResponse::from(&*snapshot)))),
        Err(e) => Err(error_response("get_metadata", e)),
    }
}

pub async fn handle_health(
    Extension(board): Extension<Arc<Leaderboard>>,
) -> ApiResult<HealthResponse> {
    match board.generation() {
        Ok(generation) => Ok((
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                generation,
            }),
        )),
        Err(e) => Err(error_response("health", e)),
    }
}

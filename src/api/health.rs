//! `GET /health`

use super::{AppState, ApiResponse, error::ApiResult};
use crate::errors::Error;
use axum::{Json, Router, extract::State, routing::get};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Answers once the database responds.
async fn health(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<()>>> {
    state.database.ping().await.map_err(Error::from)?;
    Ok(Json(ApiResponse::message("ok")))
}

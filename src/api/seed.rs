//! `POST /seed` - resets the demo to the configured menu.

use super::{AppState, ApiResponse, error::ApiResult};
use crate::core::seed::reset_and_seed;
use axum::{Json, Router, extract::State, routing::post};

pub fn router() -> Router<AppState> {
    Router::new().route("/seed", post(reseed))
}

async fn reseed(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<()>>> {
    reset_and_seed(&state.database, &state.menu).await?;
    Ok(Json(ApiResponse::message("Database seeded successfully")))
}

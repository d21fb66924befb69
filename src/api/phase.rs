//! `/phase` - which feature set the demo shows.

use super::{AppState, ApiResponse, error::ApiResult};
use crate::core::{
    phase::{Phase, PhaseFeatures},
    settings::{get_current_phase, set_current_phase},
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};

pub fn router() -> Router<AppState> {
    Router::new().route("/phase", get(current).put(select))
}

/// Phase plus the flags it enables
#[derive(Debug, Serialize)]
struct PhaseInfo {
    phase: Phase,
    features: PhaseFeatures,
    description: &'static str,
}

impl From<Phase> for PhaseInfo {
    fn from(phase: Phase) -> Self {
        Self {
            phase,
            features: phase.features(),
            description: phase.description(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PhaseRequest {
    phase: i32,
}

async fn current(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<PhaseInfo>>> {
    let phase = get_current_phase(&state.database, &state.config.restaurant_id).await?;
    Ok(Json(ApiResponse::ok(phase.into())))
}

async fn select(
    State(state): State<AppState>,
    payload: Result<Json<PhaseRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<PhaseInfo>>> {
    let Json(request) = payload?;
    let phase = Phase::try_from(request.phase)?;

    set_current_phase(&*state.database, phase).await?;
    Ok(Json(ApiResponse::ok(phase.into())))
}

//! `GET /menu`

use super::{AppState, ApiResponse, error::ApiResult};
use crate::core::menu::{MenuCategory, get_categories_with_products};
use axum::{Json, Router, extract::State, routing::get};
use chrono::Local;

pub fn router() -> Router<AppState> {
    Router::new().route("/menu", get(get_menu))
}

/// Active categories with their products, evaluated against the local clock.
async fn get_menu(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<MenuCategory>>>> {
    let categories = get_categories_with_products(
        &state.database,
        &state.config.restaurant_id,
        Local::now().time(),
    )
    .await?;
    Ok(Json(ApiResponse::ok(categories)))
}

//! `/products` - admin menu editing.

use super::{AppState, ApiResponse, error::ApiResult};
use crate::{
    core::product::{NewProduct, ProductUpdate, create_product, delete_product, update_product},
    entities::product,
    errors::Error,
};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::post,
};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new().route("/products", post(create).patch(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct ProductPatch {
    #[serde(rename = "productId", default)]
    product_id: String,
    #[serde(flatten)]
    update: ProductUpdate,
}

#[derive(Debug, Deserialize)]
struct DeleteQuery {
    id: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<product::Model>>> {
    let Json(new_product) = payload?;
    let created = create_product(&state.database, new_product).await?;
    Ok(Json(ApiResponse::ok(created)))
}

async fn update(
    State(state): State<AppState>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Json(patch) = payload?;
    if patch.product_id.trim().is_empty() {
        return Err(Error::validation("Product ID required").into());
    }

    update_product(&state.database, &patch.product_id, patch.update).await?;
    Ok(Json(ApiResponse::message("Product updated")))
}

async fn remove(
    State(state): State<AppState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Query(query) = query?;
    let product_id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| Error::validation("Product ID required"))?;

    delete_product(&state.database, &product_id).await?;
    Ok(Json(ApiResponse::message("Product deleted")))
}

//! `/orders` - placing orders and moving them through the kitchen.

use super::{AppState, ApiResponse, error::ApiResult};
use crate::{
    core::order::{
        CreatedOrder, DEFAULT_ORDER_LIMIT, NewOrder, OrderSummary, OrderWithItems, create_order,
        get_order_details, get_orders, update_order_status,
    },
    errors::Error,
};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use serde::{Deserialize, Serialize};

pub fn router() -> Router<AppState> {
    Router::new().route("/orders", get(list).post(create).patch(update_status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrdersQuery {
    order_id: Option<String>,
    limit: Option<u64>,
}

/// A single order with lines, or the recent order list
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OrdersPayload {
    Single(OrderWithItems),
    List(Vec<OrderSummary>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange {
    order_id: String,
    status: String,
}

async fn list(
    State(state): State<AppState>,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<OrdersPayload>>> {
    let Query(query) = query?;

    let payload = match query.order_id.filter(|id| !id.is_empty()) {
        Some(order_id) => {
            OrdersPayload::Single(
                get_order_details(&state.database, &state.config.restaurant_id, &order_id)
                    .await?,
            )
        }
        None => OrdersPayload::List(
            get_orders(
                &state.database,
                &state.config.restaurant_id,
                query.limit.unwrap_or(DEFAULT_ORDER_LIMIT),
            )
            .await?,
        ),
    };
    Ok(Json(ApiResponse::ok(payload)))
}

async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<CreatedOrder>>> {
    let Json(new_order) = payload?;
    let created = create_order(&state.database, &state.config.restaurant_id, new_order).await?;
    Ok(Json(ApiResponse::ok(created)))
}

async fn update_status(
    State(state): State<AppState>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let Json(change) = payload?;
    if change.order_id.trim().is_empty() || change.status.trim().is_empty() {
        return Err(Error::validation("Order ID and status required").into());
    }

    update_order_status(&state.database, &change.order_id, &change.status).await?;
    Ok(Json(ApiResponse::message("Order status updated")))
}

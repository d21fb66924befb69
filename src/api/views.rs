//! `/views` - browsing telemetry and the analytics dashboard.
//!
//! Recording is best effort: a malformed view is logged and dropped, and the
//! client still gets a success so browsing never shows an error.

use super::{AppState, ApiResponse, error::ApiResult};
use crate::core::analytics::{
    NewView, StatsPeriod, ViewKind, ViewStats, get_view_stats, record_view,
};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE, USER_AGENT},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

const SESSION_COOKIE: &str = "session_id";
const SESSION_MAX_AGE_SECS: u32 = 60 * 60 * 24 * 365;

pub fn router() -> Router<AppState> {
    Router::new().route("/views", get(stats).post(record))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewRequest {
    product_id: Option<String>,
    category_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    period: Option<String>,
}

/// Reads the session id from the `Cookie` header.
fn session_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// First address in `X-Forwarded-For`.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn header_or_unknown(headers: &HeaderMap, name: axum::http::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Turns a request into a view, or explains why it is dropped.
fn to_new_view(request: ViewRequest, session_id: String, headers: &HeaderMap) -> Result<NewView, String> {
    let kind_name = request.kind.unwrap_or_default();
    let kind = ViewKind::parse(&kind_name).ok_or_else(|| format!("unknown view type '{kind_name}'"))?;

    let (subject_id, category_id) = match kind {
        ViewKind::Product => (request.product_id, request.category_id),
        ViewKind::Category => (request.category_id, None),
    };
    let subject_id = subject_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| format!("{kind_name} view without an id"))?;

    Ok(NewView {
        kind,
        subject_id,
        category_id,
        session_id,
        ip: client_ip(headers),
        user_agent: header_or_unknown(headers, USER_AGENT),
    })
}

async fn record(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ViewRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let existing_session = session_from_cookies(&headers);
    let session_id = existing_session
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match payload {
        Ok(Json(request)) => match to_new_view(request, session_id.clone(), &headers) {
            Ok(view) => record_view(&state.database, view).await?,
            Err(reason) => warn!(%reason, "Dropping view"),
        },
        Err(rejection) => warn!(reason = %rejection.body_text(), "Dropping malformed view"),
    }

    let mut response = Json(ApiResponse::empty()).into_response();
    if existing_session.is_none() {
        let cookie = format!(
            "{SESSION_COOKIE}={session_id}; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; SameSite=Lax; HttpOnly"
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    Ok(response)
}

async fn stats(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<ViewStats>>> {
    let Query(query) = query?;
    let period = match query.period.as_deref() {
        None | Some("") => StatsPeriod::default(),
        Some(period) => period.parse()?,
    };

    let stats = get_view_stats(&state.database, period, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

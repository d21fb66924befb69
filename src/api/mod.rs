//! HTTP interface.
//!
//! | Path | Methods |
//! |------|---------|
//! | `/menu` | GET |
//! | `/orders` | GET, POST, PATCH |
//! | `/products` | POST, PATCH, DELETE |
//! | `/views` | GET, POST |
//! | `/phase` | GET, PUT |
//! | `/seed` | POST |
//! | `/health` | GET |
//!
//! Every response uses the [`ApiResponse`] envelope. Handlers only translate
//! between HTTP and [`crate::core`].

pub mod error;
mod health;
mod menu;
mod orders;
mod phase;
mod products;
pub mod response;
mod seed;
mod views;

pub use error::{ApiError, ApiResult};
pub use response::ApiResponse;

use crate::config::{menu::MenuConfig, settings::AppConfig};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Connection pool
    pub database: Arc<DatabaseConnection>,
    /// Process settings
    pub config: Arc<AppConfig>,
    /// Menu restored by `POST /seed`
    pub menu: Arc<MenuConfig>,
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60))
    }
}

/// Builds the application router with tracing and CORS applied.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_permissive);

    Router::new()
        .merge(menu::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(views::router())
        .merge(phase::router())
        .merge(seed::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        config::menu::parse_menu,
        core::{cart::Cart, menu::MenuProduct, seed::seed_demo_data},
        errors::Result,
        test_utils::setup_test_db,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::SET_COOKIE},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const TEST_MENU: &str = r#"
        [restaurant]
        id = "rest-api"
        name = "Api Pub"
        slug = "api-pub"

        [[categories]]
        id = "cat-burgers"
        name_tr = "Burgerler"
        name_en = "Burgers"
        icon = "🍔"

        [[categories.products]]
        name_tr = "Klasik Burger"
        name_en = "Classic Burger"
        price = 165.0
        related = ["prod-drinks-0"]

        [[categories]]
        id = "cat-drinks"
        name_tr = "İçecekler"
        icon = "🥤"

        [[categories.products]]
        name_tr = "Cola"
        price = 35.0
    "#;

    async fn test_app() -> Result<Router> {
        let db = setup_test_db().await?;
        let menu = parse_menu(TEST_MENU)?;
        seed_demo_data(&db, &menu).await?;

        let config = AppConfig::from_lookup(|key| match key {
            "RESTAURANT_ID" => Some("rest-api".to_string()),
            _ => None,
        })?;

        Ok(router(AppState {
            database: Arc::new(db),
            config: Arc::new(config),
            menu: Arc::new(menu),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_and_menu() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": "ok" }));

        let (status, body) = send(&app, Method::GET, "/menu", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["id"], "cat-burgers");
        assert_eq!(body["data"][0]["products"][0]["related_products"][0], "prod-drinks-0");
        assert_eq!(body["data"][1]["name"]["en"], "İçecekler");
        Ok(())
    }

    #[tokio::test]
    async fn test_cart_checkout_to_kitchen() -> Result<()> {
        let app = test_app().await?;

        let (_, menu) = send(&app, Method::GET, "/menu", None).await;
        let burger: MenuProduct =
            serde_json::from_value(menu["data"][0]["products"][0].clone()).unwrap();
        let cola: MenuProduct =
            serde_json::from_value(menu["data"][1]["products"][0].clone()).unwrap();

        let mut cart = Cart::new();
        cart.add(burger.clone());
        cart.add(burger);
        cart.add(cola);
        let order = cart.checkout("7", Some("Az pişmiş".to_string()));
        assert!(cart.is_empty());

        let (status, body) = send(
            &app,
            Method::POST,
            "/orders",
            Some(serde_json::to_value(&order).unwrap()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 365.0);
        let order_id = body["data"]["orderId"].as_str().unwrap().to_string();

        let (_, list) = send(&app, Method::GET, "/orders", None).await;
        assert_eq!(list["data"][0]["id"], order_id.as_str());
        assert_eq!(list["data"][0]["item_count"], 2);

        let (status, details) =
            send(&app, Method::GET, &format!("/orders?orderId={order_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(details["data"]["items"].as_array().unwrap().len(), 2);
        assert_eq!(details["data"]["notes"], "Az pişmiş");

        for step in ["preparing", "ready", "delivered"] {
            let (status, body) = send(
                &app,
                Method::PATCH,
                "/orders",
                Some(json!({ "orderId": order_id, "status": step })),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{step}: {body}");
        }

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/orders",
            Some(json!({ "orderId": order_id, "status": "pending" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        Ok(())
    }

    #[tokio::test]
    async fn test_order_errors() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(
            &app,
            Method::POST,
            "/orders",
            Some(json!({ "tableNumber": "1", "items": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, Method::POST, "/orders", Some(json!({ "items": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/orders?orderId=missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/orders",
            Some(json!({ "orderId": "missing", "status": "ready" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_product_admin_endpoints() -> Result<()> {
        let app = test_app().await?;

        let (status, body) = send(
            &app,
            Method::POST,
            "/products",
            Some(json!({ "categoryId": "cat-drinks", "name_tr": "Ayran", "price": 25.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let product_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/products",
            Some(json!({ "productId": product_id, "price": 199.99, "is_available": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, menu) = send(&app, Method::GET, "/menu", None).await;
        let ayran = menu["data"][1]["products"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["id"] == product_id.as_str())
            .unwrap()
            .clone();
        assert_eq!(ayran["price"], 199.99);
        assert_eq!(ayran["is_available"], false);

        let (status, _) = send(&app, Method::PATCH, "/products", Some(json!({ "price": 1.0 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PATCH,
            "/products",
            Some(json!({ "productId": "missing", "price": 1.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &format!("/products?id={product_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &format!("/products?id={product_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, "/products", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_views_record_and_report() -> Result<()> {
        let app = test_app().await?;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/views")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "type": "product", "productId": "prod-drinks-0" }).to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("session_id="));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/views")
            .header(CONTENT_TYPE, "application/json")
            .header("cookie", "session_id=known")
            .body(Body::from(
                json!({ "type": "category", "categoryId": "cat-drinks" }).to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert!(response.headers().get(SET_COOKIE).is_none());

        // Unknown kinds and malformed bodies are dropped without an error
        let (status, body) = send(&app, Method::POST, "/views", Some(json!({ "type": "banner" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&app, Method::GET, "/views?period=24h", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["topProducts"][0]["id"], "prod-drinks-0");
        assert_eq!(body["data"]["topProducts"][0]["view_count"], 1);
        assert_eq!(body["data"]["topCategories"][0]["id"], "cat-drinks");
        assert_eq!(body["data"]["stats"]["totalProductViews"], 1);
        assert_eq!(body["data"]["stats"]["uniqueVisitors"], 2);

        let (status, _) = send(&app, Method::GET, "/views", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::GET, "/views?period=1y", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_phase_endpoints() -> Result<()> {
        let app = test_app().await?;

        let (_, body) = send(&app, Method::GET, "/phase", None).await;
        assert_eq!(body["data"]["phase"], 1);
        assert_eq!(body["data"]["features"]["showCart"], false);

        let (status, body) = send(&app, Method::PUT, "/phase", Some(json!({ "phase": 3 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["phase"], 3);

        let (_, body) = send(&app, Method::GET, "/phase", None).await;
        assert_eq!(body["data"]["features"]["showCart"], true);

        let (status, _) = send(&app, Method::PUT, "/phase", Some(json!({ "phase": 4 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_resets_orders() -> Result<()> {
        let app = test_app().await?;

        let (status, _) = send(
            &app,
            Method::POST,
            "/orders",
            Some(json!({
                "tableNumber": "2",
                "items": [{ "productId": "prod-drinks-0", "quantity": 1, "unitPrice": 35.0 }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, "/seed", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Database seeded successfully");

        let (_, list) = send(&app, Method::GET, "/orders", None).await;
        assert!(list["data"].as_array().unwrap().is_empty());
        Ok(())
    }
}

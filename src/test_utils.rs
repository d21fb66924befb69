//! Shared test utilities for `menu-buddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test rows with sensible defaults. Rows are inserted directly so
//! fixtures do not depend on the validation of the code under test.

use crate::{
    entities::{category, product, related_product, restaurant},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Restaurant id used by [`setup_with_product`]
pub const TEST_RESTAURANT_ID: &str = "rest-test";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test restaurant whose slug equals its id.
///
/// # Defaults
/// * `default_phase`: 1
pub async fn create_test_restaurant(
    db: &DatabaseConnection,
    id: &str,
) -> Result<restaurant::Model> {
    restaurant::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Test Restaurant {id}")),
        slug: Set(id.to_string()),
        logo: Set(None),
        primary_color: Set("#e94560".to_string()),
        accent_color: Set("#1a1a2e".to_string()),
        default_phase: Set(1),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates an always-open test category with sort order 0.
pub async fn create_test_category(
    db: &DatabaseConnection,
    restaurant_id: &str,
) -> Result<category::Model> {
    create_custom_category(db, restaurant_id, &format!("cat-{restaurant_id}"), 0, None).await
}

/// Creates an active category with custom parameters.
///
/// `hours` is an optional `(start, end)` availability window.
pub async fn create_custom_category(
    db: &DatabaseConnection,
    restaurant_id: &str,
    id: &str,
    sort_order: i32,
    hours: Option<(&str, &str)>,
) -> Result<category::Model> {
    category::ActiveModel {
        id: Set(id.to_string()),
        restaurant_id: Set(restaurant_id.to_string()),
        name_tr: Set(format!("Kategori {id}")),
        name_en: Set(format!("Category {id}")),
        icon: Set("🍽️".to_string()),
        sort_order: Set(sort_order),
        availability_start: Set(hours.map(|(start, _)| start.to_string())),
        availability_end: Set(hours.map(|(_, end)| end.to_string())),
        is_active: Set(true),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates an available product with custom parameters.
///
/// The English name is left blank so menu fallbacks apply.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    category_id: &str,
    id: &str,
    price: f64,
    sort_order: i32,
) -> Result<product::Model> {
    let now = Utc::now();
    product::ActiveModel {
        id: Set(id.to_string()),
        category_id: Set(category_id.to_string()),
        name_tr: Set(format!("Ürün {id}")),
        name_en: Set(String::new()),
        description_tr: Set("Test ürünü".to_string()),
        description_en: Set(String::new()),
        price: Set(price),
        image: Set(format!("/images/{id}.jpg")),
        is_available: Set(true),
        sort_order: Set(sort_order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Links `related_product_id` as an upsell of `product_id`.
pub async fn link_related(
    db: &DatabaseConnection,
    product_id: &str,
    related_product_id: &str,
) -> Result<()> {
    related_product::ActiveModel {
        product_id: Set(product_id.to_string()),
        related_product_id: Set(related_product_id.to_string()),
    }
    .insert(db)
    .await?;
    Ok(())
}

/// Sets up a complete test environment with restaurant, category and product.
/// Returns (db, product) for product-related tests.
///
/// # Defaults
/// * restaurant: [`TEST_RESTAURANT_ID`]
/// * price: 10.0
pub async fn setup_with_product() -> Result<(DatabaseConnection, product::Model)> {
    let db = setup_test_db().await?;
    create_test_restaurant(&db, TEST_RESTAURANT_ID).await?;
    let category = create_test_category(&db, TEST_RESTAURANT_ID).await?;
    let product = create_custom_product(&db, &category.id, "prod-test", 10.0, 0).await?;
    Ok((db, product))
}

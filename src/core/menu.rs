//! Menu read model - nests products under their categories for display.
//!
//! This module joins active categories and their products into the tree the
//! menu screen renders, fills in English fallbacks, attaches upsell links and
//! computes whether each category is inside its availability window.

use crate::{
    core::availability::{self, AvailabilityHours},
    entities::{
        Category, Product, RelatedProduct, Restaurant, category, product, related_product,
        restaurant,
    },
    errors::{Error, Result},
};
use chrono::NaiveTime;
use sea_orm::{QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Text in both menu languages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Turkish
    pub tr: String,
    /// English
    pub en: String,
}

impl Translation {
    /// Creates a translation from both values as given.
    #[must_use]
    pub fn new(tr: &str, en: &str) -> Self {
        Self {
            tr: tr.to_string(),
            en: en.to_string(),
        }
    }

    /// Creates a translation, using the Turkish text where the English one is blank.
    #[must_use]
    pub fn with_fallback(tr: &str, en: &str) -> Self {
        let en = if en.trim().is_empty() { tr } else { en };
        Self::new(tr, en)
    }
}

/// A product as presented on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuProduct {
    /// Product id
    pub id: String,
    /// Display name
    pub name: Translation,
    /// Display description
    pub description: Translation,
    /// Current price
    pub price: f64,
    /// Image URL
    pub image: String,
    /// Whether it can be ordered right now
    pub is_available: bool,
    /// Upsell suggestions, by product id
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_products: Vec<String>,
}

/// A category with its products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    /// Category id
    pub id: String,
    /// Display name
    pub name: Translation,
    /// Emoji or icon name
    pub icon: String,
    /// Time window the category is served in, if restricted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_hours: Option<AvailabilityHours>,
    /// Whether the category is inside its window at the time of the request
    pub is_open_now: bool,
    /// Products in display order
    pub products: Vec<MenuProduct>,
}

impl MenuProduct {
    /// Builds the menu view of a product row.
    #[must_use]
    pub fn from_model(model: product::Model, related_products: Vec<String>) -> Self {
        Self {
            name: Translation::with_fallback(&model.name_tr, &model.name_en),
            description: Translation::with_fallback(&model.description_tr, &model.description_en),
            id: model.id,
            price: model.price,
            image: model.image,
            is_available: model.is_available,
            related_products,
        }
    }
}

/// Looks up a restaurant by id.
///
/// # Errors
/// Returns [`Error::RestaurantNotFound`] if no such restaurant exists.
pub async fn get_restaurant<C>(db: &C, restaurant_id: &str) -> Result<restaurant::Model>
where
    C: ConnectionTrait,
{
    Restaurant::find_by_id(restaurant_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::RestaurantNotFound {
            id: restaurant_id.to_string(),
        })
}

/// Returns the active categories of a restaurant with their products.
///
/// Categories and products are ordered by their sort order. Inactive categories
/// are left out; unavailable products are kept so the menu can show them as
/// sold out. `now` is the restaurant's local time, used for `is_open_now`.
///
/// # Errors
/// Returns an error if a database query fails.
#[instrument(skip(db))]
pub async fn get_categories_with_products(
    db: &DatabaseConnection,
    restaurant_id: &str,
    now: NaiveTime,
) -> Result<Vec<MenuCategory>> {
    let categories = Category::find()
        .filter(category::Column::RestaurantId.eq(restaurant_id))
        .filter(category::Column::IsActive.eq(true))
        .order_by_asc(category::Column::SortOrder)
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?;

    if categories.is_empty() {
        debug!("No active categories");
        return Ok(Vec::new());
    }

    let category_ids: Vec<String> = categories.iter().map(|c| c.id.clone()).collect();
    let products = Product::find()
        .filter(product::Column::CategoryId.is_in(category_ids))
        .order_by_asc(product::Column::SortOrder)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await?;

    let mut related = related_products_for(db, &products).await?;

    let mut by_category: HashMap<String, Vec<MenuProduct>> = HashMap::new();
    for model in products {
        let links = related.remove(&model.id).unwrap_or_default();
        by_category
            .entry(model.category_id.clone())
            .or_default()
            .push(MenuProduct::from_model(model, links));
    }

    let menu = categories
        .into_iter()
        .map(|c| {
            let availability_hours = availability::availability_hours(
                c.availability_start.as_deref(),
                c.availability_end.as_deref(),
            );
            let is_open_now = availability::is_open(availability_hours.as_ref(), now);
            MenuCategory {
                name: Translation::with_fallback(&c.name_tr, &c.name_en),
                products: by_category.remove(&c.id).unwrap_or_default(),
                id: c.id,
                icon: c.icon,
                availability_hours,
                is_open_now,
            }
        })
        .collect::<Vec<_>>();

    debug!(categories = menu.len(), "Menu assembled");
    Ok(menu)
}

/// Upsell links for `products`, keyed by product id.
async fn related_products_for(
    db: &DatabaseConnection,
    products: &[product::Model],
) -> Result<HashMap<String, Vec<String>>> {
    if products.is_empty() {
        return Ok(HashMap::new());
    }

    let product_ids: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
    let links = RelatedProduct::find()
        .filter(related_product::Column::ProductId.is_in(product_ids))
        .order_by_asc(related_product::Column::RelatedProductId)
        .all(db)
        .await?;

    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for link in links {
        map.entry(link.product_id).or_default().push(link.related_product_id);
    }
    Ok(map)
}

//! Product administration - creating, editing and removing menu items.
//!
//! This module backs the admin menu editor. Edits are partial: only the fields
//! present in a [`ProductUpdate`] are written. Order lines keep their own copy
//! of the price, so editing a product never changes past orders.

use crate::{
    entities::{Category, OrderItem, Product, RelatedProduct, order_item, product, related_product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Fields for a new product
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Category to list it under
    pub category_id: String,
    /// Turkish name
    #[serde(rename = "name_tr")]
    pub name_tr: String,
    /// English name, defaults to the Turkish one
    #[serde(default, rename = "name_en")]
    pub name_en: Option<String>,
    /// Turkish description
    #[serde(default, rename = "description_tr")]
    pub description_tr: Option<String>,
    /// English description
    #[serde(default, rename = "description_en")]
    pub description_en: Option<String>,
    /// Unit price
    pub price: f64,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial product edit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductUpdate {
    /// New Turkish name
    #[serde(default)]
    pub name_tr: Option<String>,
    /// New English name
    #[serde(default)]
    pub name_en: Option<String>,
    /// New Turkish description
    #[serde(default)]
    pub description_tr: Option<String>,
    /// New English description
    #[serde(default)]
    pub description_en: Option<String>,
    /// New price
    #[serde(default)]
    pub price: Option<f64>,
    /// New image URL
    #[serde(default)]
    pub image: Option<String>,
    /// New availability
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl ProductUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name_tr.is_none()
            && self.name_en.is_none()
            && self.description_tr.is_none()
            && self.description_en.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.is_available.is_none()
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Retrieves a product by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new, available product at the end of its category.
///
/// # Errors
/// Returns an error if:
/// - The category id or Turkish name is blank
/// - The price is negative or not finite (NaN, infinity)
/// - The category does not exist
/// - The database insert operation fails
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    if new.category_id.trim().is_empty() {
        return Err(Error::validation("Category id is required"));
    }
    let name_tr = new.name_tr.trim().to_string();
    if name_tr.is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    validate_price(new.price)?;

    Category::find_by_id(new.category_id.as_str())
        .one(db)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            id: new.category_id.clone(),
        })?;

    let sort_order = Product::find()
        .filter(product::Column::CategoryId.eq(new.category_id.as_str()))
        .count(db)
        .await?;

    let now = chrono::Utc::now();
    let name_en = new
        .name_en
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| name_tr.clone());

    let product = product::ActiveModel {
        id: Set(format!("prod-{}", Uuid::new_v4())),
        category_id: Set(new.category_id),
        name_tr: Set(name_tr),
        name_en: Set(name_en),
        description_tr: Set(new.description_tr.unwrap_or_default()),
        description_en: Set(new.description_en.unwrap_or_default()),
        price: Set(new.price),
        image: Set(new.image.unwrap_or_default()),
        is_available: Set(true),
        sort_order: Set(i32::try_from(sort_order).unwrap_or(i32::MAX)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let created = product.insert(db).await?;

    info!(product_id = %created.id, "Product created");
    Ok(created)
}

/// Applies a partial update to a product and refreshes its `updated_at`.
///
/// # Errors
/// Returns an error if:
/// - The update is empty
/// - A new Turkish name is blank, or a new price is negative or not finite
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: &str,
    update: ProductUpdate,
) -> Result<product::Model> {
    if update.is_empty() {
        return Err(Error::validation("No updates provided"));
    }
    if let Some(price) = update.price {
        validate_price(price)?;
    }
    if update.name_tr.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(Error::validation("Product name cannot be empty"));
    }

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?
        .into();

    if let Some(name_tr) = update.name_tr {
        product.name_tr = Set(name_tr.trim().to_string());
    }
    if let Some(name_en) = update.name_en {
        product.name_en = Set(name_en);
    }
    if let Some(description_tr) = update.description_tr {
        product.description_tr = Set(description_tr);
    }
    if let Some(description_en) = update.description_en {
        product.description_en = Set(description_en);
    }
    if let Some(price) = update.price {
        product.price = Set(price);
    }
    if let Some(image) = update.image {
        product.image = Set(image);
    }
    if let Some(is_available) = update.is_available {
        product.is_available = Set(is_available);
    }
    product.updated_at = Set(chrono::Utc::now());

    product.update(db).await.map_err(Into::into)
}

/// Permanently removes a product and its upsell links.
///
/// Products that appear on an order cannot be deleted, since the order history
/// refers to them; mark them unavailable instead.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - The product has been ordered
/// - A database operation fails
pub async fn delete_product(db: &DatabaseConnection, product_id: &str) -> Result<()> {
    let txn = db.begin().await?;

    let product = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    let ordered = OrderItem::find()
        .filter(order_item::Column::ProductId.eq(product_id))
        .count(&txn)
        .await?;
    if ordered > 0 {
        return Err(Error::validation(format!(
            "Product {product_id} has been ordered; mark it unavailable instead"
        )));
    }

    RelatedProduct::delete_many()
        .filter(
            related_product::Column::ProductId
                .eq(product_id)
                .or(related_product::Column::RelatedProductId.eq(product_id)),
        )
        .exec(&txn)
        .await?;
    product.delete(&txn).await?;

    txn.commit().await?;

    info!(product_id, "Product deleted");
    Ok(())
}

//! Demo data seeding.
//!
//! Loads a [`MenuConfig`] into an empty database, or wipes the menu and
//! orders and loads it again. View logs are never touched, so analytics
//! survive a demo reset.

use crate::{
    config::menu::MenuConfig,
    core::phase::Phase,
    entities::{
        Category, Order, OrderItem, Product, RelatedProduct, Restaurant, category, product,
        related_product, restaurant,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*};
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Seeds the demo menu unless a restaurant with the same slug already exists.
///
/// Returns `true` when data was inserted.
///
/// # Errors
/// Returns an error if the menu is inconsistent or a database operation
/// fails; nothing is written in that case.
#[instrument(skip(db, menu), fields(slug = %menu.restaurant.slug))]
pub async fn seed_demo_data(db: &DatabaseConnection, menu: &MenuConfig) -> Result<bool> {
    let txn = db.begin().await?;

    let existing = Restaurant::find()
        .filter(restaurant::Column::Slug.eq(menu.restaurant.slug.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        info!("Database already seeded");
        return Ok(false);
    }

    insert_menu(&txn, menu).await?;
    txn.commit().await?;
    Ok(true)
}

/// Deletes all menu and order data and seeds the demo menu again.
///
/// # Errors
/// Returns an error if the menu is inconsistent or a database operation
/// fails; the previous data is kept in that case.
#[instrument(skip(db, menu), fields(slug = %menu.restaurant.slug))]
pub async fn reset_and_seed(db: &DatabaseConnection, menu: &MenuConfig) -> Result<()> {
    let txn = db.begin().await?;

    OrderItem::delete_many().exec(&txn).await?;
    Order::delete_many().exec(&txn).await?;
    RelatedProduct::delete_many().exec(&txn).await?;
    Product::delete_many().exec(&txn).await?;
    Category::delete_many().exec(&txn).await?;
    Restaurant::delete_many().exec(&txn).await?;

    insert_menu(&txn, menu).await?;
    txn.commit().await?;

    info!("Demo data reset");
    Ok(())
}

async fn insert_menu<C>(conn: &C, menu: &MenuConfig) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now();
    let config = &menu.restaurant;
    let default_phase = Phase::try_from(config.default_phase)?;

    restaurant::ActiveModel {
        id: Set(config.id.clone()),
        name: Set(config.name.clone()),
        slug: Set(config.slug.clone()),
        logo: Set(config.logo.clone()),
        primary_color: Set(config.primary_color.clone()),
        accent_color: Set(config.accent_color.clone()),
        default_phase: Set(default_phase.number()),
        created_at: Set(now),
    }
    .insert(conn)
    .await?;

    let mut categories = Vec::with_capacity(menu.categories.len());
    let mut products = Vec::new();
    let mut links = Vec::new();

    for (cat_index, cat) in menu.categories.iter().enumerate() {
        let sort_order = i32::try_from(cat_index)
            .map_err(|_| Error::validation("Too many categories in menu"))?;
        categories.push(category::ActiveModel {
            id: Set(cat.id.clone()),
            restaurant_id: Set(config.id.clone()),
            name_tr: Set(cat.name_tr.clone()),
            name_en: Set(cat.name_en.clone().unwrap_or_else(|| cat.name_tr.clone())),
            icon: Set(cat.icon.clone()),
            sort_order: Set(sort_order),
            availability_start: Set(cat.availability_start.clone()),
            availability_end: Set(cat.availability_end.clone()),
            is_active: Set(true),
            created_at: Set(now),
        });

        for (prod_index, prod) in cat.products.iter().enumerate() {
            let product_id = cat.product_id(prod_index);
            let sort_order = i32::try_from(prod_index)
                .map_err(|_| Error::validation("Too many products in category"))?;
            products.push(product::ActiveModel {
                id: Set(product_id.clone()),
                category_id: Set(cat.id.clone()),
                name_tr: Set(prod.name_tr.clone()),
                name_en: Set(prod.name_en.clone().unwrap_or_else(|| prod.name_tr.clone())),
                description_tr: Set(prod.description_tr.clone()),
                description_en: Set(prod
                    .description_en
                    .clone()
                    .unwrap_or_else(|| prod.description_tr.clone())),
                price: Set(prod.price),
                image: Set(prod.image.clone().unwrap_or_default()),
                is_available: Set(prod.available),
                sort_order: Set(sort_order),
                created_at: Set(now),
                updated_at: Set(now),
            });
            for related in &prod.related {
                links.push((product_id.clone(), related.clone()));
            }
        }
    }

    let known_products: HashSet<String> = menu
        .categories
        .iter()
        .flat_map(|cat| (0..cat.products.len()).map(|i| cat.product_id(i)))
        .collect();

    let category_count = categories.len();
    let product_count = products.len();
    if !categories.is_empty() {
        Category::insert_many(categories)
            .exec_without_returning(conn)
            .await?;
    }
    if !products.is_empty() {
        Product::insert_many(products)
            .exec_without_returning(conn)
            .await?;
    }

    let mut seen = HashSet::new();
    let links: Vec<related_product::ActiveModel> = links
        .into_iter()
        .filter(|(from, to)| {
            if from == to || !known_products.contains(to) {
                warn!(from = %from, to = %to, "Skipping related product link");
                return false;
            }
            seen.insert((from.clone(), to.clone()))
        })
        .map(|(from, to)| related_product::ActiveModel {
            product_id: Set(from),
            related_product_id: Set(to),
        })
        .collect();
    let link_count = links.len();
    if !links.is_empty() {
        RelatedProduct::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }

    info!(
        restaurant_id = %config.id,
        categories = category_count,
        products = product_count,
        related_links = link_count,
        "Seeded demo menu"
    );
    Ok(())
}

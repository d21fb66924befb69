//! Product entity - a single orderable menu item.
//!
//! Prices are plain `f64` in the restaurant's currency. Products are edited in
//! place by the admin; order lines snapshot the price separately.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Stable identifier (e.g. `"prod-burgers-0"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Category this product is listed under
    pub category_id: String,
    /// Turkish name
    pub name_tr: String,
    /// English name, may be empty
    pub name_en: String,
    /// Turkish description
    pub description_tr: String,
    /// English description, may be empty
    pub description_en: String,
    /// Current unit price
    pub price: f64,
    /// Image URL
    pub image: String,
    /// Whether the kitchen can currently serve it
    pub is_available: bool,
    /// Position within the category, ascending
    pub sort_order: i32,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product appears on many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Order entity - a table's submitted cart.
//!
//! `status` is stored as its lowercase string; the allowed values and
//! transitions live in [`crate::core::order::OrderStatus`]. `total` is the sum of
//! the order lines at creation time and is not recomputed afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// UUID v4 string
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Restaurant the order was placed at
    pub restaurant_id: String,
    /// Table number as entered by the guest
    pub table_number: String,
    /// One of `pending`, `preparing`, `ready`, `delivered`, `cancelled`
    pub status: String,
    /// Sum of quantity x unit price over the order lines
    pub total: f64,
    /// Free-text notes for the kitchen
    pub notes: Option<String>,
    /// When the order was placed
    pub created_at: DateTimeUtc,
    /// When the status last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    /// One order has many lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

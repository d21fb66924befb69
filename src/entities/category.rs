//! Category entity - a menu section such as "Breakfast" or "Drinks".
//!
//! Names are stored per language. The optional availability window is a pair of
//! `HH:MM` strings interpreted as a same-day range.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Stable identifier (e.g. `"cat-burgers"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning restaurant
    pub restaurant_id: String,
    /// Turkish name
    pub name_tr: String,
    /// English name, may be empty
    pub name_en: String,
    /// Emoji or icon name
    pub icon: String,
    /// Position in the menu, ascending
    pub sort_order: i32,
    /// Start of the availability window (`HH:MM`)
    pub availability_start: Option<String>,
    /// End of the availability window (`HH:MM`)
    pub availability_end: Option<String>,
    /// Inactive categories are hidden from the menu and analytics
    pub is_active: bool,
    /// When the category was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

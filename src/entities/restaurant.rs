//! Restaurant entity - the tenant every category and order belongs to.
//!
//! Created once at seed time. Carries the display theme and the phase the demo
//! starts in when no phase has been selected yet.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    /// Stable identifier (e.g. `"rest-cemil"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug, used as the seed existence check
    #[sea_orm(unique)]
    pub slug: String,
    /// Logo path or URL
    pub logo: Option<String>,
    /// Theme primary colour (hex)
    pub primary_color: String,
    /// Theme accent colour (hex)
    pub accent_color: String,
    /// Phase (1-3) used until one is explicitly selected
    pub default_phase: i32,
    /// When the restaurant was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Restaurant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One restaurant has many categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
    /// One restaurant has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

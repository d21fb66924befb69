//! Product view entity - append-only log of product detail views.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product view event
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_views")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Viewed product
    #[sea_orm(indexed)]
    pub product_id: String,
    /// Category the product was viewed from, if known
    pub category_id: Option<String>,
    /// Visitor session (cookie derived)
    pub session_id: String,
    /// Client address as reported by the proxy
    pub ip_address: String,
    /// Client user agent
    pub user_agent: String,
    /// When the view happened
    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
}

/// Views are telemetry and carry no foreign keys
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

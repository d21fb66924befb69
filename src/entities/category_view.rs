//! Category view entity - append-only log of category page views.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category view event
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category_views")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Viewed category
    #[sea_orm(indexed)]
    pub category_id: String,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

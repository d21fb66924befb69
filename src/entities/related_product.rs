//! Related product entity - upsell links between two products.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Related product link model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "related_products")]
pub struct Model {
    /// Product the suggestion is shown for
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: String,
    /// Product being suggested
    #[sea_orm(primary_key, auto_increment = false)]
    pub related_product_id: String,
}

/// Defines relationships between `RelatedProduct` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The product the link starts from
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

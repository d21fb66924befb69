//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod category_view;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_view;
pub mod related_product;
pub mod restaurant;
pub mod system_state;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use category_view::{
    Column as CategoryViewColumn, Entity as CategoryView, Model as CategoryViewModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use product_view::{
    Column as ProductViewColumn, Entity as ProductView, Model as ProductViewModel,
};
pub use related_product::{
    Column as RelatedProductColumn, Entity as RelatedProduct, Model as RelatedProductModel,
};
pub use restaurant::{Column as RestaurantColumn, Entity as Restaurant, Model as RestaurantModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};

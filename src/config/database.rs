//! Database configuration module.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! The backend is picked from the URL scheme (`sqlite://` or `postgres://`), so every
//! query in `core` runs unchanged on either. Tables are generated from the entity
//! definitions with `Schema::create_table_from_entity`, which keeps the schema in
//! step with the Rust structs without hand-written SQL.

use crate::entities::{
    Category, CategoryView, Order, OrderItem, Product, ProductView, RelatedProduct, Restaurant,
    SystemState,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

/// Default database when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/menu.sqlite?mode=rwc";

/// Establishes a connection to the database at `database_url`.
///
/// For file-backed `SQLite` URLs the parent directory is created first so a fresh
/// checkout can start without any setup.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    if let Some(path) = sqlite_file_path(database_url)
        && let Some(parent) = std::path::Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = Database::connect(database_url).await?;
    info!(backend = ?db.get_database_backend(), "Database connection opened");
    Ok(db)
}

/// Returns the file path of a file-backed `SQLite` URL, `None` for anything else.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path)
    }
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();

    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;

    for mut index in schema.create_index_from_entity(entity) {
        index.if_not_exists();
        db.execute(builder.build(&index)).await?;
    }

    debug!(table = entity.table_name(), "Table ensured");
    Ok(())
}

/// Creates all tables that do not exist yet, parents before children.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Restaurant).await?;
    create_table(db, &schema, Category).await?;
    create_table(db, &schema, Product).await?;
    create_table(db, &schema, RelatedProduct).await?;
    create_table(db, &schema, Order).await?;
    create_table(db, &schema, OrderItem).await?;
    create_table(db, &schema, ProductView).await?;
    create_table(db, &schema, CategoryView).await?;
    create_table(db, &schema, SystemState).await?;

    info!("Database tables ensured");
    Ok(())
}

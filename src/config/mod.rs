/// Database connection and table creation
pub mod database;

/// Demo menu loading from menu.toml
pub mod menu;

/// Process settings from environment variables
pub mod settings;

//! Demo menu loading from menu.toml
//!
//! This module provides functionality to load the demo restaurant, its categories
//! and products from a TOML file. The menu defined there is used to seed the
//! database on first run and whenever the admin resets the demo.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// The demo menu shipped with the binary.
const EMBEDDED_MENU: &str = include_str!("../../menu.toml");

/// Configuration structure representing the entire menu.toml file
#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    /// The restaurant being seeded
    pub restaurant: RestaurantConfig,
    /// Categories in display order
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

/// Restaurant identity and theme
#[derive(Debug, Deserialize, Clone)]
pub struct RestaurantConfig {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug, unique
    pub slug: String,
    /// Logo path or URL
    #[serde(default)]
    pub logo: Option<String>,
    /// Theme primary colour
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    /// Theme accent colour
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// Phase the demo starts in
    #[serde(default = "default_phase")]
    pub default_phase: i32,
}

/// A single category and its products
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Stable identifier, conventionally `cat-<name>`
    pub id: String,
    /// Turkish name
    pub name_tr: String,
    /// English name
    #[serde(default)]
    pub name_en: Option<String>,
    /// Emoji or icon name
    #[serde(default)]
    pub icon: String,
    /// Start of the availability window (`HH:MM`)
    #[serde(default)]
    pub availability_start: Option<String>,
    /// End of the availability window (`HH:MM`)
    #[serde(default)]
    pub availability_end: Option<String>,
    /// Products in display order
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// A single product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Turkish name
    pub name_tr: String,
    /// English name
    #[serde(default)]
    pub name_en: Option<String>,
    /// Turkish description
    #[serde(default)]
    pub description_tr: String,
    /// English description
    #[serde(default)]
    pub description_en: Option<String>,
    /// Unit price
    pub price: f64,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Whether the product can be ordered
    #[serde(default = "default_available")]
    pub available: bool,
    /// Ids of products suggested alongside this one
    #[serde(default)]
    pub related: Vec<String>,
}

fn default_primary_color() -> String {
    "#e94560".to_string()
}

fn default_accent_color() -> String {
    "#1a1a2e".to_string()
}

const fn default_phase() -> i32 {
    1
}

const fn default_available() -> bool {
    true
}

impl CategoryConfig {
    /// Id of the product at `index` within this category.
    ///
    /// `cat-burgers` + 2 gives `prod-burgers-2`.
    #[must_use]
    pub fn product_id(&self, index: usize) -> String {
        let suffix = self.id.strip_prefix("cat-").unwrap_or(&self.id);
        format!("prod-{suffix}-{index}")
    }
}

/// Parses a menu from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or required fields are missing.
pub fn parse_menu(contents: &str) -> Result<MenuConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse menu config: {e}"),
    })
}

/// Loads a menu from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<MenuConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!(
            "Failed to read menu config {}: {e}",
            path.as_ref().display()
        ),
    })?;

    parse_menu(&contents)
}

/// Loads the menu from `path` when given, otherwise the embedded demo menu.
pub fn load_menu_or_default(path: Option<&Path>) -> Result<MenuConfig> {
    match path {
        Some(p) => load_menu(p),
        None => parse_menu(EMBEDDED_MENU),
    }
}

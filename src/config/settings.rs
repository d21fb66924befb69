//! Process settings read from environment variables.
//!
//! Every setting has a default so the service starts with an empty environment.
//! `.env` is loaded by `main` before [`AppConfig::from_env`] runs.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use std::{net::SocketAddr, path::PathBuf, str::FromStr};
use tracing::debug;

/// Restaurant served when `RESTAURANT_ID` is not set.
pub const DEFAULT_RESTAURANT_ID: &str = "rest-cemil";

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SeaORM` connection URL, `sqlite://` or `postgres://`
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// Restaurant every request is served for
    pub restaurant_id: String,
    /// Optional seed menu file; the embedded demo menu is used when absent
    pub menu_config: Option<PathBuf>,
    /// Seed the demo menu on startup when the database is empty
    pub seed_on_startup: bool,
    /// Allow any origin, for the browser frontend running on another port
    pub cors_permissive: bool,
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a value is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = parse_or(&lookup, "BIND_ADDR", "0.0.0.0:3000")?;
        let restaurant_id =
            lookup("RESTAURANT_ID").unwrap_or_else(|| DEFAULT_RESTAURANT_ID.to_string());
        let menu_config = lookup("MENU_CONFIG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let seed_on_startup = parse_or(&lookup, "SEED_ON_STARTUP", "true")?;
        let cors_permissive = parse_or(&lookup, "CORS_PERMISSIVE", "true")?;

        Ok(Self {
            database_url,
            bind_addr,
            restaurant_id,
            menu_config,
            seed_on_startup,
            cors_permissive,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| Error::Config {
        message: format!("Invalid {key} value '{raw}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.restaurant_id, DEFAULT_RESTAURANT_ID);
        assert!(config.menu_config.is_none());
        assert!(config.seed_on_startup);
        assert!(config.cors_permissive);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://menu@localhost/menu"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("RESTAURANT_ID", "rest-other"),
            ("MENU_CONFIG", "demo/menu.toml"),
            ("SEED_ON_STARTUP", "false"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://menu@localhost/menu");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.restaurant_id, "rest-other");
        assert_eq!(config.menu_config, Some(PathBuf::from("demo/menu.toml")));
        assert!(!config.seed_on_startup);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let result = AppConfig::from_lookup(lookup_from(&[("BIND_ADDR", "not-an-address")]));
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = AppConfig::from_lookup(lookup_from(&[("SEED_ON_STARTUP", "maybe")]));
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}

//! Framework-agnostic business logic.
//!
//! Everything here takes a `DatabaseConnection` (or plain values) and returns
//! [`crate::errors::Result`]; the HTTP layer only translates.

pub mod analytics;
pub mod availability;
pub mod cart;
pub mod menu;
pub mod order;
pub mod phase;
pub mod product;
pub mod seed;
pub mod settings;

//! Unified error types for the menu service.
//!
//! Every fallible operation in `core` and `config` returns [`Result`]. The HTTP
//! layer maps these variants onto status codes in [`crate::api::error`].

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A required field was missing or blank
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable reason, safe to show to a caller
        message: String,
    },

    /// A price or total that is negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// An order line quantity below one
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected value
        quantity: i32,
    },

    /// Phase outside 1..=3
    #[error("Invalid phase: {phase}")]
    InvalidPhase {
        /// The rejected value
        phase: i32,
    },

    /// Order status string that is not one of the known states
    #[error("Invalid order status: {status}")]
    InvalidStatus {
        /// The rejected value
        status: String,
    },

    /// Order status change that the lifecycle does not allow
    #[error("Cannot move order from {from} to {to}")]
    IllegalTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Analytics period other than 24h, 7d or 30d
    #[error("Invalid period: {period}")]
    InvalidPeriod {
        /// The rejected value
        period: String,
    },

    /// Restaurant not found
    #[error("Restaurant not found: {id}")]
    RestaurantNotFound {
        /// Requested id
        id: String,
    },

    /// Category not found
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Requested id
        id: String,
    },

    /// Product not found
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested id
        id: String,
    },

    /// Order not found
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// Requested id
        id: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the bank
//!
//! This module provides the error type shared by the account store and the
//! gateway. Store failures surface as [`Error::Database`] or
//! [`Error::AccountNotFound`]; the gateway adds its own HTTP-facing wrapper.

use std::fmt::Display;
use thiserror::Error;

/// Bank error type
#[derive(Debug, Error)]
pub enum Error {
    /// No row exists for the given account id
    #[error("account {0} not found")]
    AccountNotFound(i64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Backend unreachable or query failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                // Not-found keeps its exact message, it is shown to API callers
                other => other,
            }
        })
    }
}

//! Common types and utilities for the bank
//!
//! Shared between the account service and the API gateway: the unified
//! error type, the account data model and database bootstrap helpers.

pub mod error;
pub mod model;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;

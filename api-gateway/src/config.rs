//! Application configuration

use std::env;

/// Address the server listens on when nothing else is configured
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, `host:port`
    pub listen_addr: String,
    /// Secret used to sign and verify account tokens
    pub jwt_secret: Option<String>,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            jwt_secret: env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

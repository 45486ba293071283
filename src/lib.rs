// This is a metapackage for cross-crate tests
// Re-export crates as modules

pub use account_service;
pub use api_gateway;
pub use common;

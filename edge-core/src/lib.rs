//! Apigee Edge management API client
//!
//! Validates organization credentials and manages user roles and their
//! permissions over the Edge management REST API.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod retry;

pub use auth::Credentials;
pub use client::EdgeManagementClient;
pub use config::EdgeConfig;
pub use error::{EdgeError, EdgeResult};
pub use models::{Organization, ResourcePermission, Role};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}

// Shared fixtures for the edge-core integration tests

#![allow(dead_code)]

use edge_core::config::{ENV_ENDPOINT, ENV_ORGANIZATION, ENV_PASSWORD, ENV_USERNAME};
use edge_core::logging::{init_logging, LogConfig, LogLevel};
use edge_core::{EdgeConfig, EdgeManagementClient};
use std::env;
use std::sync::Once;
use uuid::Uuid;
use wiremock::MockServer;

pub const ORGANIZATION: &str = "acme";
pub const USERNAME: &str = "orgadmin@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const TEST_ROLE_NAME: &str = "temp_role";

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        init_logging(LogConfig::builder().level(LogLevel::Debug).build());
    });
}

/// Path of an organization-scoped resource on the mock server
pub fn org_path(suffix: &str) -> String {
    format!("/v1/o/{}{}", ORGANIZATION, suffix)
}

pub fn mock_config(server: &MockServer) -> EdgeConfig {
    EdgeConfig::builder()
        .endpoint(format!("{}/v1", server.uri()))
        .organization(ORGANIZATION)
        .username(USERNAME)
        .password(PASSWORD)
        .build()
        .expect("mock config is valid")
}

pub fn mock_client(server: &MockServer) -> EdgeManagementClient {
    init_test_logging();
    EdgeManagementClient::new(mock_config(server)).expect("client builds")
}

/// Client for a real Edge organization, or `None` (with a note on stderr)
/// when any of the APIGEE_EDGE_* variables is missing.
pub fn live_client() -> Option<EdgeManagementClient> {
    for key in [ENV_ENDPOINT, ENV_ORGANIZATION, ENV_USERNAME, ENV_PASSWORD] {
        if env::var(key).map(|v| v.is_empty()).unwrap_or(true) {
            eprintln!("Environment variable {} is not set, skipping live Edge test", key);
            return None;
        }
    }
    init_test_logging();
    Some(EdgeManagementClient::from_env().expect("APIGEE_EDGE_* variables form a valid config"))
}

/// Role name unique to one test run, so parallel tests never share a role.
pub fn unique_role_name() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}_{}", TEST_ROLE_NAME, &id[..8])
}

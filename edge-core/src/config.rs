// Connection configuration for the Edge management API

use crate::auth::Credentials;
use crate::error::{EdgeError, EdgeResult};
use crate::http::HttpConfig;
use crate::logging::redact;
use std::env;
use std::fmt;

pub const DEFAULT_ENDPOINT: &str = "https://api.enterprise.apigee.com/v1";

pub const ENV_ENDPOINT: &str = "APIGEE_EDGE_ENDPOINT";
pub const ENV_ORGANIZATION: &str = "APIGEE_EDGE_ORGANIZATION";
pub const ENV_USERNAME: &str = "APIGEE_EDGE_USERNAME";
pub const ENV_PASSWORD: &str = "APIGEE_EDGE_PASSWORD";

/// Everything needed to reach one organization.
#[derive(Clone)]
pub struct EdgeConfig {
    pub endpoint: String,
    pub organization: String,
    pub username: String,
    pub password: String,
    pub http: HttpConfig,
}

impl EdgeConfig {
    pub fn builder() -> EdgeConfigBuilder {
        EdgeConfigBuilder::default()
    }

    /// Load from `APIGEE_EDGE_ENDPOINT`, `APIGEE_EDGE_ORGANIZATION`,
    /// `APIGEE_EDGE_USERNAME` and `APIGEE_EDGE_PASSWORD`. All four are required.
    pub fn from_env() -> EdgeResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> EdgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| EdgeError::config(format!("Environment variable {} is not set", key)))
        };

        let config = Self {
            endpoint: require(ENV_ENDPOINT)?,
            organization: require(ENV_ORGANIZATION)?,
            username: require(ENV_USERNAME)?,
            password: require(ENV_PASSWORD)?,
            http: HttpConfig::default(),
        };
        config.validate()
    }

    /// Check every field and normalize the endpoint (no trailing slash).
    pub fn validate(mut self) -> EdgeResult<Self> {
        for (field, value) in [
            ("endpoint", &self.endpoint),
            ("organization", &self.organization),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(EdgeError::config(format!("{} must not be empty", field)));
            }
        }

        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(EdgeError::config(format!(
                "endpoint must be an http(s) URL, got {}",
                self.endpoint
            )));
        }

        if self.organization.contains('/') {
            return Err(EdgeError::config("organization must not contain '/'"));
        }

        if self.organization == "." || self.organization == ".." {
            return Err(EdgeError::config(format!(
                "organization {} is not a valid path segment",
                self.organization
            )));
        }

        self.endpoint = self.endpoint.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// `{endpoint}/o/{organization}`
    pub fn organization_url(&self) -> String {
        format!(
            "{}/o/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.organization)
        )
    }
}

impl fmt::Debug for EdgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeConfig")
            .field("endpoint", &self.endpoint)
            .field("organization", &self.organization)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("http", &self.http)
            .finish()
    }
}

#[derive(Default)]
pub struct EdgeConfigBuilder {
    endpoint: Option<String>,
    organization: Option<String>,
    username: Option<String>,
    password: Option<String>,
    http: Option<HttpConfig>,
}

impl EdgeConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Build and validate. Endpoint defaults to the public Edge cloud.
    pub fn build(self) -> EdgeResult<EdgeConfig> {
        EdgeConfig {
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            organization: self.organization.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            http: self.http.unwrap_or_default(),
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_ENDPOINT, "https://edge.example.com/v1/".to_string()),
            (ENV_ORGANIZATION, "acme".to_string()),
            (ENV_USERNAME, "orgadmin@example.com".to_string()),
            (ENV_PASSWORD, "s3cret".to_string()),
        ])
    }

    #[test]
    fn loads_all_variables_and_trims_endpoint() {
        let env = full_env();
        let config = EdgeConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        assert_eq!(config.endpoint, "https://edge.example.com/v1");
        assert_eq!(config.organization_url(), "https://edge.example.com/v1/o/acme");
        assert_eq!(config.credentials().username(), "orgadmin@example.com");
    }

    #[test]
    fn names_the_missing_variable() {
        let mut env = full_env();
        env.remove(ENV_PASSWORD);
        let err = EdgeConfig::from_lookup(|key| env.get(key).cloned()).unwrap_err();
        assert!(err.to_string().contains("APIGEE_EDGE_PASSWORD"));
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let mut env = full_env();
        env.insert(ENV_ORGANIZATION, String::new());
        let err = EdgeConfig::from_lookup(|key| env.get(key).cloned()).unwrap_err();
        assert!(err.to_string().contains("APIGEE_EDGE_ORGANIZATION"));
    }

    #[test]
    fn builder_rejects_bad_endpoint() {
        let err = EdgeConfig::builder()
            .endpoint("ftp://edge.example.com")
            .organization("acme")
            .username("u")
            .password("p")
            .build()
            .unwrap_err();
        assert!(matches!(err, EdgeError::Config { .. }));
    }

    #[test]
    fn builder_defaults_endpoint_and_requires_the_rest() {
        let config = EdgeConfig::builder()
            .organization("acme")
            .username("u")
            .password("p")
            .build()
            .unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        let err = EdgeConfig::builder().organization("acme").build().unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn dot_segment_organization_is_rejected() {
        for organization in [".", ".."] {
            let err = EdgeConfig::builder()
                .organization(organization)
                .username("u")
                .password("p")
                .build()
                .unwrap_err();
            assert!(matches!(err, EdgeError::Config { .. }));
        }
    }

    #[test]
    fn debug_redacts_password() {
        let env = full_env();
        let config = EdgeConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("acme"));
    }
}

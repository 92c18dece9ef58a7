// HTTP plumbing for the Edge management API
//
// Every request carries Basic auth and asks for JSON. Status codes are not
// judged here; callers decide what each status means for their operation.

use crate::auth::Credentials;
use crate::error::{EdgeError, EdgeResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use tracing::debug;

pub use self::config::{HttpConfig, HttpConfigBuilder, DEFAULT_USER_AGENT};

mod config;

const APPLICATION_JSON: &str = "application/json";

/// HTTP methods used by the management API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Authenticated HTTP client bound to one base URL
#[derive(Debug, Clone)]
pub struct EdgeHttpClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl EdgeHttpClient {
    /// Create a client. Paths passed to `get`/`post`/`delete` are appended to
    /// `base_url` verbatim.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: &HttpConfig,
    ) -> EdgeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| EdgeError::Transport {
                message: format!("Failed to build HTTP client: {}", e),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> HttpRequestBuilder<'_> {
        HttpRequestBuilder::new(self, HttpMethod::Get, self.url(path))
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> HttpRequestBuilder<'_> {
        HttpRequestBuilder::new(self, HttpMethod::Post, self.url(path))
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> HttpRequestBuilder<'_> {
        HttpRequestBuilder::new(self, HttpMethod::Delete, self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// HTTP request builder for fluent API
pub struct HttpRequestBuilder<'a> {
    client: &'a EdgeHttpClient,
    method: HttpMethod,
    url: String,
    body: Option<EdgeResult<Vec<u8>>>,
}

impl<'a> HttpRequestBuilder<'a> {
    fn new(client: &'a EdgeHttpClient, method: HttpMethod, url: String) -> Self {
        Self {
            client,
            method,
            url,
            body: None,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_vec(body).map_err(|e| EdgeError::Decode {
            message: format!("Failed to encode request body: {}", e),
            source: Some(Box::new(e)),
        }));
        self
    }

    /// Send the request. Any HTTP status counts as success at this layer.
    pub async fn send(self) -> EdgeResult<HttpResponse> {
        let inner = &self.client.client;
        let mut request = match self.method {
            HttpMethod::Get => inner.get(&self.url),
            HttpMethod::Post => inner.post(&self.url),
            HttpMethod::Delete => inner.delete(&self.url),
        };

        request = request
            .header(AUTHORIZATION, self.client.credentials.basic_header())
            .header(ACCEPT, APPLICATION_JSON);

        if let Some(body) = self.body {
            request = request.header(CONTENT_TYPE, APPLICATION_JSON).body(body?);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request timeout: {} {}", self.method, self.url)
            } else if e.is_connect() {
                format!("Connection failed: {} {}", self.method, self.url)
            } else {
                format!("Network error: {} {}", self.method, self.url)
            };
            EdgeError::Transport {
                message,
                status: None,
                source: Some(Box::new(e)),
            }
        })?;

        debug!(
            method = %self.method,
            url = %self.url,
            status = response.status().as_u16(),
            "Edge API response"
        );

        Ok(HttpResponse { inner: response })
    }
}

/// HTTP response wrapper
#[derive(Debug)]
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// Get response status code
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Parse response as JSON
    pub async fn json<T: DeserializeOwned>(self) -> EdgeResult<T> {
        let body = self.text().await?;
        serde_json::from_str(&body).map_err(|e| EdgeError::Decode {
            message: format!("Failed to parse JSON: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Get response as text
    pub async fn text(self) -> EdgeResult<String> {
        self.inner.text().await.map_err(|e| EdgeError::Transport {
            message: format!("Failed to read response: {}", e),
            status: None,
            source: Some(Box::new(e)),
        })
    }
}

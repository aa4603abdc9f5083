//! HTTP session for the Denvr API
//!
//! [`Transport`] is the seam between the resource clients and the network;
//! [`Session`] is its `reqwest` implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::endpoint::HttpMethod;
use crate::validate::ResolvedRequest;
use crate::{DenvrError, Result};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Executes validated requests against the API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Configuration used to fill in parameter defaults
    fn config(&self) -> &Config;

    /// Send one request and return the decoded response body
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        request: &ResolvedRequest,
    ) -> Result<Value>;
}

/// Session bound to one server and one set of credentials
#[derive(Clone)]
pub struct Session {
    config: Config,
    client: Client,
    base_url: String,
}

impl Session {
    /// Create a new session
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("denvr-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DenvrError::ClientBuild)?;

        Self::with_client(config, client)
    }

    /// Create a session around an existing HTTP client
    pub fn with_client(config: Config, client: Client) -> Result<Self> {
        let server = config.server();
        Url::parse(server).map_err(|source| DenvrError::InvalidServerUrl {
            url: server.to_string(),
            source,
        })?;
        let base_url = server.trim_end_matches('/').to_string();

        Ok(Self {
            config,
            client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full API URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl Transport for Session {
    fn config(&self) -> &Config {
        &self.config
    }

    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        request: &ResolvedRequest,
    ) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method.into(), &url);

        if let Some(token) = self.config.token() {
            builder = builder.bearer_auth(token);
        }

        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        if let Some(body) = request.json() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(DenvrError::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(DenvrError::ResponseRead)?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(DenvrError::HttpStatus { status, body });
        }

        // Handle empty response
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(DenvrError::Decode)
    }
}

//! Travis CI API client.
//!
//! Low-level HTTP client that handles authentication and raw requests
//! against the Travis v3 REST API. Higher-level operations are implemented
//! via traits on entity types.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, TravisError};

/// Base URL of the public (open source) Travis API.
pub const ORG_API_URL: &str = "https://api.travis-ci.org";
/// Base URL of the private (pro) Travis API.
pub const PRO_API_URL: &str = "https://api.travis-ci.com";

const USER_AGENT: &str = concat!("travis-ci-provider/", env!("CARGO_PKG_VERSION"));
const API_VERSION_HEADER: &str = "travis-api-version";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which Travis deployment to talk to.
///
/// The public and pro tiers expose the same API and differ only in their
/// base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Endpoint {
    /// travis-ci.org
    #[default]
    Org,
    /// travis-ci.com
    Pro,
    /// Any other deployment (enterprise installs, test servers).
    Custom(Url),
}

impl Endpoint {
    /// Base URL for this endpoint.
    pub fn base_url(&self) -> &str {
        match self {
            Self::Org => ORG_API_URL,
            Self::Pro => PRO_API_URL,
            Self::Custom(url) => url.as_str(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}

/// Low-level Travis API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, and `Activate` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use travis_ci_provider::{Endpoint, TravisClient};
///
/// # fn example() -> travis_ci_provider::Result<()> {
/// // Create from environment variables
/// let client = TravisClient::from_env()?;
///
/// // Or configure manually
/// let client = TravisClient::for_endpoint("your-travis-token", &Endpoint::Pro)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TravisClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl fmt::Debug for TravisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravisClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl TravisClient {
    /// Create a client from environment variables.
    ///
    /// Uses `TRAVIS_TOKEN` for authentication and optionally `TRAVIS_API_URL`
    /// for the base URL (defaults to `https://api.travis-ci.org`).
    ///
    /// # Errors
    ///
    /// Returns an error if `TRAVIS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TRAVIS_TOKEN").map_err(|_| {
            TravisError::ConfigMissing("TRAVIS_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("TRAVIS_API_URL").unwrap_or_else(|_| ORG_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a client for one of the known Travis deployments.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty.
    pub fn for_endpoint(token: &str, endpoint: &Endpoint) -> Result<Self> {
        Self::new(token, endpoint.base_url())
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// No network I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TravisError::ConfigMissing(
                "Travis access token is empty".to_string(),
            ));
        }

        let base_url = normalize_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static("3"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TravisError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Exchange a GitHub personal access token for a Travis token and build
    /// a client with it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without touching the network if the GitHub
    /// token is empty, or an API error if Travis rejects it.
    #[tracing::instrument(skip(github_token))]
    pub async fn exchange_github_token(github_token: &str, endpoint: &Endpoint) -> Result<Self> {
        #[derive(Serialize)]
        struct ExchangeRequest<'a> {
            github_token: &'a str,
        }

        #[derive(Deserialize)]
        struct ExchangeResponse {
            access_token: String,
        }

        let github_token = github_token.trim();
        if github_token.is_empty() {
            return Err(TravisError::ConfigMissing(
                "GitHub access token is empty".to_string(),
            ));
        }

        let base_url = normalize_base_url(endpoint.base_url())?;
        let url = base_url.join("auth/github")?;

        // The token exchange only exists in the v2 API.
        let response = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(TravisError::HttpError)?
            .post(url)
            .header(ACCEPT, "application/vnd.travis-ci.2.1+json")
            .json(&ExchangeRequest { github_token })
            .send()
            .await
            .map_err(TravisError::HttpError)?;

        let response = Self::check_response(response).await?;
        let body: ExchangeResponse = response.json().await.map_err(TravisError::HttpError)?;

        tracing::debug!(%endpoint, "exchanged GitHub token for Travis token");
        Self::new(&body.access_token, base_url.as_str())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(TravisError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .get(url)
            .header("Authorization", self.auth_header())
            .query(query)
            .send()
            .await
            .map_err(TravisError::HttpError)?;

        Self::check_response(response).await
    }

    /// Make a POST request without a body.
    ///
    /// Travis state-change endpoints (activate, deactivate, sync) take no
    /// payload.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;

        let response = self
            .http
            .post(url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(TravisError::HttpError)?;

        Self::check_response(response).await
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(TravisError::NotFound {
                entity_type: "Resource",
                id: response.url().path().to_string(),
            });
        }

        // Handle rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(TravisError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        tracing::debug!(status = status.as_u16(), %message, "Travis API request failed");
        Err(TravisError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // Travis v3 errors carry `error_message`; v2 uses `error` or `message`.
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            for field in ["error_message", "message", "error"] {
                if let Some(msg) = json.get(field).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

/// Parse a base URL, making sure it ends with `/` so relative joins keep
/// any path prefix.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let base_url_str = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    };

    Ok(Url::parse(&base_url_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = TravisClient::new("test-token", ORG_API_URL).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("TravisClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = TravisClient::new("token", "https://travis.example.com/api").unwrap();
        let client2 = TravisClient::new("token", "https://travis.example.com/api/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.base_url().join("user").unwrap().as_str(),
            "https://travis.example.com/api/user"
        );
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = TravisClient::new("   ", ORG_API_URL).unwrap_err();
        assert!(matches!(err, TravisError::ConfigMissing(_)));
    }

    #[test]
    fn test_endpoints_differ_only_in_base_url() {
        let org = TravisClient::for_endpoint("token", &Endpoint::Org).unwrap();
        let pro = TravisClient::for_endpoint("token", &Endpoint::Pro).unwrap();
        assert_eq!(org.base_url().as_str(), "https://api.travis-ci.org/");
        assert_eq!(pro.base_url().as_str(), "https://api.travis-ci.com/");
    }

    #[tokio::test]
    async fn test_exchange_rejects_empty_github_token() {
        let err = TravisClient::exchange_github_token("", &Endpoint::Org)
            .await
            .unwrap_err();
        assert!(matches!(err, TravisError::ConfigMissing(_)));
    }
}

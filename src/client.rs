//! Snyk API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource operations live on the service views returned by
//! [`SnykClient::orgs`], [`SnykClient::groups`], [`SnykClient::projects`] and
//! [`SnykClient::reporting`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{Result, SnykError};
use crate::models::{GroupsService, OrgsService, ProjectsService, ReportingService};
use crate::response::ResponseInfo;

const DEFAULT_API_URL: &str = "https://snyk.io/api/";
const USER_AGENT: &str = concat!("snykapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Snyk API client.
///
/// Handles authentication and HTTP requests. Every request is a single
/// exchange: there is no retry, caching or rate limiting at this layer.
/// Dropping a returned future cancels the in-flight request.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use snykapi::SnykClient;
///
/// # async fn example() -> snykapi::Result<()> {
/// // Create from environment variables
/// let client = SnykClient::from_env()?;
///
/// // Or configure manually
/// let client = SnykClient::new("your-api-token", "https://snyk.io/api/")?;
/// let (orgs, _response) = client.orgs().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SnykClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for SnykClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnykClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl SnykClient {
    /// Create a client from environment variables.
    ///
    /// Uses `SNYK_TOKEN` for authentication and optionally `SNYK_API_URL`
    /// for the base URL (defaults to `https://snyk.io/api/`).
    ///
    /// # Errors
    ///
    /// Returns an error if `SNYK_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("SNYK_TOKEN").map_err(|_| {
            SnykError::ConfigMissing("SNYK_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("SNYK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Snyk API token
    /// * `base_url` - Base URL for the Snyk API (e.g., `https://snyk.io/api/`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Relative joins drop the last segment unless the base ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(SnykError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Replace the underlying HTTP client.
    ///
    /// The caller's client owns timeouts, proxies, TLS and the user agent.
    #[must_use]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Organization operations.
    pub fn orgs(&self) -> OrgsService<'_> {
        OrgsService::new(self)
    }

    /// Group operations.
    pub fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(self)
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Reporting operations.
    pub fn reporting(&self) -> ReportingService<'_> {
        ReportingService::new(self)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::GET, path)?;
        Self::execute(request).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let request = self.request(Method::GET, path)?.query(query);
        Self::execute(request).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(Method::POST, path)?.json(body);
        Self::execute(request).await
    }

    /// Make a POST request with query parameters and a JSON body.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn post_with_query<Q: Serialize + ?Sized, B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        body: &B,
    ) -> Result<Response> {
        let request = self.request(Method::POST, path)?.query(query).json(body);
        Self::execute(request).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.request(Method::DELETE, path)?;
        Self::execute(request).await
    }

    /// Decode a successful response body into `T`.
    ///
    /// Decode failures keep the response descriptor so callers can still see
    /// what the server sent back.
    pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<(T, ResponseInfo)> {
        let info = ResponseInfo::from(&response);
        let body = response.bytes().await.map_err(SnykError::HttpError)?;

        match serde_json::from_slice(&body) {
            Ok(value) => Ok((value, info)),
            Err(source) => Err(SnykError::ParseError {
                source,
                response: Box::new(info),
            }),
        }
    }

    /// Build an authenticated request for a path relative to the base URL.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;

        Ok(self
            .http
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token)))
    }

    async fn execute(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(SnykError::HttpError)?;

        tracing::debug!(
            url = %response.url(),
            status = response.status().as_u16(),
            "Snyk API response"
        );

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let info = Box::new(ResponseInfo::from(&response));

        if status.as_u16() == 429 {
            let retry_after = info.header("retry-after").and_then(|v| v.parse().ok());
            tracing::warn!(retry_after = ?retry_after, "Snyk API rate limit reached");
            return Err(SnykError::RateLimited {
                retry_after_secs: retry_after,
                response: info,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(SnykError::ApiError {
            message,
            response: info,
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) if !b.trim().is_empty() => b,
            _ => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        body
    }
}

//! Response descriptor returned alongside every decoded value.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// Status, headers and final URL of a completed HTTP exchange.
///
/// Every operation hands one of these back next to its decoded value, and
/// failed exchanges carry one inside the error, so callers can always look at
/// the status code or headers such as `retry-after`.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The URL that produced this response.
    pub url: Url,
}

impl ResponseInfo {
    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl From<&reqwest::Response> for ResponseInfo {
    fn from(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }
}

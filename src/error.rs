//! Error types for Snyk API operations.

use thiserror::Error;

use crate::response::ResponseInfo;

/// Locally detected argument problems.
///
/// These are returned before any request is sent and compare by value, so
/// callers can match on them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    /// A required identifier was empty.
    #[error("empty argument is not allowed")]
    EmptyArgument,

    /// A mandatory request payload was missing.
    #[error("empty payload is not allowed")]
    EmptyPayload,

    /// An identifier would change the request path (`.` or `..`).
    #[error("argument is not a valid path segment")]
    InvalidArgument,
}

/// Errors that can occur during Snyk API operations.
#[derive(Debug, Error)]
pub enum SnykError {
    /// The call was rejected before reaching the network.
    #[error(transparent)]
    Precondition(#[from] Precondition),

    /// Configuration is missing or incomplete.
    #[error("Snyk configuration required: {0}")]
    ConfigMissing(String),

    /// The server answered with a non-success status.
    #[error("Snyk API error ({}): {message}", .response.status)]
    ApiError {
        message: String,
        response: Box<ResponseInfo>,
    },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited {
        retry_after_secs: Option<u64>,
        response: Box<ResponseInfo>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {source}")]
    ParseError {
        #[source]
        source: serde_json::Error,
        response: Box<ResponseInfo>,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl SnykError {
    /// The response descriptor, when a response was received.
    pub fn response(&self) -> Option<&ResponseInfo> {
        match self {
            Self::ApiError { response, .. }
            | Self::RateLimited { response, .. }
            | Self::ParseError { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// HTTP status code of the failed exchange, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpError(err) => err.status().map(|s| s.as_u16()),
            _ => self.response().map(|r| r.status.as_u16()),
        }
    }

    /// The precondition kind, if the call never left the client.
    pub fn precondition(&self) -> Option<Precondition> {
        match self {
            Self::Precondition(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for Snyk operations.
pub type Result<T> = core::result::Result<T, SnykError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    fn info(status: u16) -> Box<ResponseInfo> {
        Box::new(ResponseInfo {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            url: "https://snyk.io/api/orgs".parse().unwrap(),
        })
    }

    #[test]
    fn test_precondition_compares_by_value() {
        let err: SnykError = Precondition::EmptyArgument.into();
        assert_eq!(err.precondition(), Some(Precondition::EmptyArgument));
        assert_ne!(err.precondition(), Some(Precondition::EmptyPayload));
        assert!(err.response().is_none());
        assert!(err.status_code().is_none());
    }

    #[test]
    fn test_api_error_exposes_status() {
        let err = SnykError::ApiError {
            message: "Org not found".to_string(),
            response: info(404),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.precondition().is_none());
        assert!(err.to_string().contains("Org not found"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_precondition_messages() {
        assert_eq!(
            Precondition::EmptyArgument.to_string(),
            "empty argument is not allowed"
        );
        assert_eq!(
            Precondition::EmptyPayload.to_string(),
            "empty payload is not allowed"
        );
        assert_eq!(
            Precondition::InvalidArgument.to_string(),
            "argument is not a valid path segment"
        );
    }
}

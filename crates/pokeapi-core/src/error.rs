//! Typed errors surfaced by the client.
//!
//! Every failed request produces exactly one of `Http`, `Network` or
//! `Validation`. `Config` is only returned while building a transport or
//! client, never by a request.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::transport::FetchError;
use crate::validate::ValidationIssue;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Terminal non-2xx response.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Transport-level failure, including timeouts once retries are used up.
    #[error("network error: {0}")]
    Network(#[source] NetworkCause),

    /// Response body did not match the expected shape.
    #[error("response validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Invalid transport or client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn is_http(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            _ => None,
        }
    }
}

impl From<NetworkCause> for Error {
    fn from(cause: NetworkCause) -> Self {
        Error::Network(cause)
    }
}

/// Non-2xx response: status, resolved URL, method and a short body preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status: u16,
    pub url: String,
    pub method: &'static str,
    pub body_snippet: Option<String>,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} returned HTTP {}", self.method, self.url, self.status)?;
        match self.body_snippet.as_deref() {
            Some(snippet) if !snippet.is_empty() => write!(f, ": {}", snippet),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for HttpError {}

/// Underlying cause wrapped by [`Error::Network`].
#[derive(Debug, Error)]
pub enum NetworkCause {
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Body of a 2xx response was not complete JSON.
    #[error("malformed response body: {0}")]
    Body(#[source] serde_json::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_snippet() {
        let e = HttpError {
            status: 404,
            url: "https://pokeapi.co/api/v2/pokemon/missingno/".to_string(),
            method: "GET",
            body_snippet: Some("Not Found".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "GET https://pokeapi.co/api/v2/pokemon/missingno/ returned HTTP 404: Not Found"
        );
    }

    #[test]
    fn http_error_display_without_snippet() {
        let e = HttpError {
            status: 503,
            url: "http://x/y".to_string(),
            method: "GET",
            body_snippet: None,
        };
        assert_eq!(e.to_string(), "GET http://x/y returned HTTP 503");
    }

    #[test]
    fn kinds_are_distinguishable() {
        let http: Error = HttpError {
            status: 404,
            url: "u".to_string(),
            method: "GET",
            body_snippet: None,
        }
        .into();
        let net: Error = NetworkCause::TimedOut(Duration::from_millis(10)).into();
        let val = Error::Validation(vec![ValidationIssue::new("name", "must not be empty")]);

        assert!(http.is_http() && !http.is_network() && !http.is_validation());
        assert_eq!(http.status(), Some(404));
        assert!(net.is_network() && net.status().is_none());
        assert!(net.to_string().contains("timed out"));
        assert!(val.is_validation());
        assert!(val.to_string().contains("name: must not be empty"));
    }
}

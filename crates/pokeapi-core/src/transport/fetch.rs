//! Pluggable HTTP GET mechanism.

use async_trait::async_trait;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of the underlying HTTP mechanism (no usable response).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Body(#[source] BoxError),
}

impl FetchError {
    pub fn request(err: impl Into<BoxError>) -> Self {
        FetchError::Request(err.into())
    }

    pub fn body(err: impl Into<BoxError>) -> Self {
        FetchError::Body(err.into())
    }
}

/// One outbound GET. No body is ever sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Response with its body already read.
///
/// A body read failure is kept alongside the status so a non-2xx response can
/// still be reported when its preview cannot be read.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Result<Vec<u8>, FetchError>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Ok(body.into()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value with a case-insensitive name match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP mechanism used by the transport.
///
/// Implementations perform exactly one GET per call and do not retry; timeouts
/// and cancellation are applied by the caller, which drops the returned future.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError>;
}

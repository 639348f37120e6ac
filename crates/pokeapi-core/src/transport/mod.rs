//! Request transport.
//!
//! One logical GET = URL resolution, header merge, then up to `attempts`
//! strictly sequential attempts. Each attempt races the fetch against the
//! timeout and the caller's cancellation token, and is classified into an
//! [`AttemptOutcome`] for the retry loop.
//!
//! ```text
//! Transport::get(path)
//!     → target.rs (resolve URL, merge headers)
//!     → retry::run_with_retry
//!         → attempt: cancel::with_deadline(Fetch::get)
//!         → non-2xx: HttpError (+ body preview), retry on 429/5xx
//!         → 2xx: decode JSON into T
//! ```

mod fetch;
#[cfg(feature = "reqwest")]
mod reqwest_fetch;
mod target;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cancel::{self, CancellationToken};
use crate::error::{Error, HttpError, NetworkCause, Result};
use crate::retry::{self, AttemptOutcome, RetryPolicy, DEFAULT_BACKOFF, DEFAULT_RETRY_ATTEMPTS};
use crate::validate::ValidationIssue;

pub use fetch::{BoxError, Fetch, FetchError, FetchRequest, FetchResponse};
#[cfg(feature = "reqwest")]
pub use reqwest_fetch::ReqwestFetcher;
pub use target::{is_absolute_url, merge_headers, resolve_url};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Maximum number of characters kept from an error response body.
pub const BODY_SNIPPET_LIMIT: usize = 200;
pub const SDK_HEADER_NAME: &str = "X-SDK";
pub const SDK_HEADER_VALUE: &str = concat!("pokeapi-rs/", env!("CARGO_PKG_VERSION"));

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Aborts the in-flight attempt or backoff sleep when cancelled.
    pub cancel: Option<CancellationToken>,
    /// Extra headers; override transport defaults with the same name.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Retrying, timeout-bounded GET transport. Cheap to clone.
#[derive(Clone)]
pub struct Transport {
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    policy: RetryPolicy,
    fetcher: Arc<dyn Fetch>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Transport with all defaults and the built-in fetcher.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET `path` (relative to the base URL, or absolute) and decode the JSON
    /// body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T> {
        let request = FetchRequest {
            url: resolve_url(&self.base_url, path),
            headers: merge_headers(&self.headers, &options.headers),
        };
        let request = &request;
        let token = options.cancel.as_ref();
        retry::run_with_retry(&self.policy, token, move |n| self.attempt(request, token, n)).await
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
        token: Option<&CancellationToken>,
        n: u32,
    ) -> AttemptOutcome<T> {
        tracing::debug!(url = %request.url, attempt = n, "GET");

        let fetch = self.fetcher.get(request);
        let response = match cancel::with_deadline(self.timeout, token, fetch).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return retry::classify_network(NetworkCause::Fetch(err)),
            Err(cause) => return retry::classify_network(cause),
        };

        if !response.is_success() {
            let error = HttpError {
                status: response.status,
                url: request.url.clone(),
                method: "GET",
                body_snippet: body_snippet(&response.body, BODY_SNIPPET_LIMIT),
            };
            let retry_after = response.header("retry-after").map(str::to_string);
            return retry::classify_status(error, retry_after);
        }

        match response.body {
            Ok(bytes) => decode(&bytes),
            Err(err) => retry::classify_network(NetworkCause::Fetch(err)),
        }
    }
}

/// Incomplete JSON is a transport problem and retryable; well-formed JSON of
/// the wrong shape is a validation failure.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> AttemptOutcome<T> {
    match serde_json::from_slice::<T>(bytes) {
        Ok(value) => AttemptOutcome::Success(value),
        Err(err) if err.is_data() => AttemptOutcome::Terminal(Error::Validation(vec![
            ValidationIssue::new("$", err.to_string()),
        ])),
        Err(err) => retry::classify_network(NetworkCause::Body(err)),
    }
}

/// Up to `limit` characters of the body; `None` when it could not be read.
fn body_snippet(body: &Result<Vec<u8>, FetchError>, limit: usize) -> Option<String> {
    body.as_ref()
        .ok()
        .map(|bytes| String::from_utf8_lossy(bytes).chars().take(limit).collect())
}

/// Builder for [`Transport`].
pub struct TransportBuilder {
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    attempts: u32,
    backoff: Duration,
    fetcher: Option<Arc<dyn Fetch>>,
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: vec![(SDK_HEADER_NAME.to_string(), SDK_HEADER_VALUE.to_string())],
            timeout: DEFAULT_TIMEOUT,
            attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
            fetcher: None,
        }
    }
}

impl fmt::Debug for TransportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportBuilder")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("attempts", &self.attempts)
            .field("backoff", &self.backoff)
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}

impl TransportBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add or replace a default header (case-insensitive name match).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers = merge_headers(&self.headers, &[(name.into(), value.into())]);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total tries per call, including the first; values below 1 become 1.
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Fails with [`Error::Config`] when no fetcher was supplied and none is
    /// built in.
    pub fn build(self) -> Result<Transport> {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => default_fetcher()?,
        };
        Ok(Transport {
            base_url: self.base_url,
            headers: self.headers,
            timeout: self.timeout,
            policy: RetryPolicy::new(self.attempts, self.backoff),
            fetcher,
        })
    }
}

#[cfg(feature = "reqwest")]
fn default_fetcher() -> Result<Arc<dyn Fetch>> {
    let fetcher = ReqwestFetcher::new()
        .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
    Ok(Arc::new(fetcher))
}

#[cfg(not(feature = "reqwest"))]
fn default_fetcher() -> Result<Arc<dyn Fetch>> {
    Err(Error::Config("a fetch implementation is required".to_string()))
}

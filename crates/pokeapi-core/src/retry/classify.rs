//! Classify the result of one attempt into an explicit outcome variant.

use std::fmt;

use crate::error::{Error, HttpError, NetworkCause};

/// Result of a single request-and-classify cycle.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    /// May be retried if the attempt budget allows.
    Retryable(RetryableFailure),
    /// Surfaced to the caller immediately.
    Terminal(Error),
}

/// A failure the retry loop is allowed to recover from.
#[derive(Debug)]
pub enum RetryableFailure {
    /// 429 or 5xx response, with its raw `Retry-After` value if any.
    Status {
        error: HttpError,
        retry_after: Option<String>,
    },
    /// Timeout or transport failure.
    Network(NetworkCause),
}

impl RetryableFailure {
    pub fn retry_after(&self) -> Option<&str> {
        match self {
            RetryableFailure::Status { retry_after, .. } => retry_after.as_deref(),
            RetryableFailure::Network(_) => None,
        }
    }

    /// Error reported when no further attempt is made.
    pub fn into_error(self) -> Error {
        match self {
            RetryableFailure::Status { error, .. } => Error::Http(error),
            RetryableFailure::Network(cause) => Error::Network(cause),
        }
    }
}

impl fmt::Display for RetryableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryableFailure::Status { error, .. } => write!(f, "{}", error),
            RetryableFailure::Network(cause) => write!(f, "{}", cause),
        }
    }
}

/// 429 and every 5xx are retryable; all other statuses are terminal.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Classify a non-2xx response.
pub fn classify_status<T>(error: HttpError, retry_after: Option<String>) -> AttemptOutcome<T> {
    if is_retryable_status(error.status) {
        AttemptOutcome::Retryable(RetryableFailure::Status { error, retry_after })
    } else {
        AttemptOutcome::Terminal(Error::Http(error))
    }
}

/// Classify a failure that produced no usable response.
///
/// External cancellation is terminal; timeouts and transport errors retry.
pub fn classify_network<T>(cause: NetworkCause) -> AttemptOutcome<T> {
    match cause {
        NetworkCause::Cancelled => AttemptOutcome::Terminal(Error::Network(cause)),
        cause => AttemptOutcome::Retryable(RetryableFailure::Network(cause)),
    }
}

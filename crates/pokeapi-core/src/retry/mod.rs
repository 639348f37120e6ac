//! Retry and backoff policy.
//!
//! Each attempt is classified into an explicit [`AttemptOutcome`]; the loop in
//! [`run_with_retry`] branches on that tag and asks [`RetryPolicy`] for the
//! delay. Retry eligibility: 429, 5xx, timeouts and transport failures.
//! Delay: `Retry-After` when usable, else `base * attempt + jitter`.

mod classify;
mod policy;
mod run;

pub use classify::{
    classify_network, classify_status, is_retryable_status, AttemptOutcome, RetryableFailure,
};
pub use policy::{
    next_delay, parse_retry_after, RetryDecision, RetryPolicy, DEFAULT_BACKOFF,
    DEFAULT_RETRY_ATTEMPTS, MAX_JITTER,
};
pub use run::run_with_retry;

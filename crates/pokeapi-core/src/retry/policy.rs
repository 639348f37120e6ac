use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::classify::RetryableFailure;

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(300);
/// Upper bound (exclusive) of the random jitter added to computed backoff.
pub const MAX_JITTER: Duration = Duration::from_millis(100);

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry; surface the failure.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Attempt budget plus linear backoff with jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_ATTEMPTS, DEFAULT_BACKOFF)
    }
}

impl RetryPolicy {
    /// `attempts` counts every try including the first and is raised to 1.
    pub fn new(attempts: u32, base_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_backoff,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn base_backoff(&self) -> Duration {
        self.base_backoff
    }

    /// Decide what to do after `attempt` (1-based) failed with a retryable
    /// failure. Returns `NoRetry` once the attempt budget is used up.
    pub fn decide(&self, attempt: u32, failure: &RetryableFailure) -> RetryDecision {
        if attempt >= self.attempts {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(next_delay(attempt, self.base_backoff, failure.retry_after()))
    }
}

/// Delay before the attempt following failed attempt `attempt` (1-based).
///
/// A `Retry-After` value wins when it is a non-negative number of seconds or an
/// HTTP-date in the future. Otherwise: `base * attempt + jitter`, with jitter
/// uniform in `[0, MAX_JITTER)`.
pub fn next_delay(attempt: u32, base_backoff: Duration, retry_after: Option<&str>) -> Duration {
    next_delay_at(attempt, base_backoff, retry_after, Utc::now())
}

pub(crate) fn next_delay_at(
    attempt: u32,
    base_backoff: Duration,
    retry_after: Option<&str>,
    now: DateTime<Utc>,
) -> Duration {
    if let Some(delay) = retry_after.and_then(|v| parse_retry_after(v, now)) {
        return delay;
    }
    let jitter_us = rand::thread_rng().gen_range(0..MAX_JITTER.as_micros() as u64);
    base_backoff
        .saturating_mul(attempt.max(1))
        .saturating_add(Duration::from_micros(jitter_us))
}

/// Parse a `Retry-After` header value relative to `now`.
///
/// Returns `None` for empty or unparseable values, for second counts too large
/// for a `Duration` and for dates not in the future, so callers fall back to
/// computed backoff.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(secs) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }
    let target = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    (target - now).to_std().ok().filter(|d| !d.is_zero())
}

//! Retry loop: run an attempt until success, a terminal failure, or the policy says stop.

use std::future::Future;

use super::classify::AttemptOutcome;
use super::policy::{RetryDecision, RetryPolicy};
use crate::cancel::{self, CancellationToken};
use crate::error::Result;

/// Runs `attempt` (called with the 1-based attempt number) until it succeeds
/// or fails terminally. On a retryable failure, sleeps for the policy's delay
/// and tries again; attempts never overlap. When the budget is used up the
/// last failure is returned as its typed error.
pub async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    token: Option<&CancellationToken>,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T>>,
{
    let mut n = 1u32;
    loop {
        let failure = match attempt(n).await {
            AttemptOutcome::Success(value) => return Ok(value),
            AttemptOutcome::Terminal(err) => return Err(err),
            AttemptOutcome::Retryable(failure) => failure,
        };
        match policy.decide(n, &failure) {
            RetryDecision::NoRetry => {
                tracing::debug!(attempt = n, error = %failure, "giving up");
                return Err(failure.into_error());
            }
            RetryDecision::RetryAfter(delay) => {
                tracing::warn!(
                    attempt = n,
                    max_attempts = policy.attempts(),
                    delay_ms = delay.as_millis() as u64,
                    error = %failure,
                    "retrying request"
                );
                cancel::sleep(delay, token).await?;
                n += 1;
            }
        }
    }
}

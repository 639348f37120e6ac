//! Deadline and cancellation composition for a single attempt.
//!
//! The effective signal is the first of a fixed timeout and an optional
//! caller-supplied [`CancellationToken`]. Both are plain futures raced against
//! the work, so dropping the combined future releases the timer and the token
//! registration on every exit path.

use std::future::Future;
use std::time::Duration;

pub use tokio_util::sync::CancellationToken;

use crate::error::NetworkCause;

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Run `work` until it completes, `timeout` elapses, or `token` fires.
///
/// Cancellation wins a tie with completion so a cancelled call never reports
/// success.
pub async fn with_deadline<F>(
    timeout: Duration,
    token: Option<&CancellationToken>,
    work: F,
) -> Result<F::Output, NetworkCause>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancelled(token) => Err(NetworkCause::Cancelled),
        res = tokio::time::timeout(timeout, work) => {
            res.map_err(|_| NetworkCause::TimedOut(timeout))
        }
    }
}

/// Backoff sleep that ends early with `Cancelled` if `token` fires.
pub async fn sleep(delay: Duration, token: Option<&CancellationToken>) -> Result<(), NetworkCause> {
    tokio::select! {
        biased;
        _ = cancelled(token) => Err(NetworkCause::Cancelled),
        _ = tokio::time::sleep(delay) => Ok(()),
    }
}

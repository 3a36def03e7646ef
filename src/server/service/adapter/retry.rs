//! Bounded retry with linear backoff.

use std::{future::Future, time::Duration};

use crate::server::error::AppError;

/// How often and how patiently an upstream call is retried.
///
/// Attempt `n` that fails transiently is followed by a sleep of `backoff × n` before the
/// next attempt, so with the defaults the delays are 2s then 4s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first, at least 1.
    pub attempts: u32,
    /// Base delay multiplied by the attempt number.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            backoff,
        }
    }

    /// Runs `operation` until it succeeds, fails permanently or attempts run out.
    ///
    /// # Arguments
    /// - `label` - Description of the call for log lines
    /// - `operation` - Produces a fresh future per attempt
    ///
    /// # Returns
    /// - `Ok(T)` - An attempt succeeded
    /// - `Err(AppError)` - Last error, either non-transient or from the final attempt
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.attempts => {
                    let delay = self.backoff * attempt;
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {}ms",
                        label,
                        attempt,
                        self.attempts,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

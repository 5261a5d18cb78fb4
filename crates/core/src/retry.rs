//! Bounded retry with a fixed delay between attempts.
//!
//! Used at startup to wait for the database to become reachable. The
//! policy is a plain value so callers can build it from configuration and
//! tests can use millisecond delays.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between two attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

/// Retry an async operation up to `max_attempts` times, sleeping `delay`
/// between failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Fixed pause after each failed attempt (not after the last).
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_DELAY)
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number. The error of the final
    /// attempt is returned unchanged. `label` only appears in log lines.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(attempt, "{label} succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "{label} failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "{label} failed after all attempts");
                    return Err(e);
                }
            }
        }
    }
}

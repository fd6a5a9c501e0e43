//! Retry policy for transient request failures.

use finstat_traits::sanitize_error_text;
use std::{fmt, future::Future, time::Duration};
use tokio::time::sleep;
use tracing::warn;

/// Specifies the delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay before retry `n` (zero based) is `base * factor^n`, capped at `max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// The delay to wait before retry number `retry` (zero based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { base, factor, max } => {
                let seconds = base.as_secs_f64() * factor.powf(f64::from(retry));
                if seconds.is_finite() && seconds >= 0.0 {
                    Duration::try_from_secs_f64(seconds.min(max.as_secs_f64())).unwrap_or(max)
                } else {
                    max
                }
            }
        }
    }
}

/// How many times to attempt an operation and how long to wait in between.
///
/// The policy is independent of HTTP: [`RetryPolicy::run`] wraps any async
/// operation and takes a predicate deciding which errors are worth another
/// attempt.
///
/// # Example
///
/// ```
/// use finstat_fmp::{Backoff, RetryPolicy};
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.backoff().delay(0), Duration::from_secs(2));
/// assert_eq!(policy.backoff().delay(1), Duration::from_secs(4));
/// assert_eq!(policy.backoff().delay(5), Duration::from_secs(10));
///
/// let fast = RetryPolicy::new(5, Backoff::Fixed(Duration::from_millis(10)));
/// assert_eq!(fast.max_attempts(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Exponential {
                base: Duration::from_secs(2),
                factor: 2.0,
                max: Duration::from_secs(10),
            },
        }
    }
}

impl RetryPolicy {
    /// A policy making at most `max_attempts` attempts in total (at least one).
    #[must_use]
    pub const fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            backoff,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, Backoff::Fixed(Duration::ZERO))
    }

    /// Total number of attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The backoff schedule.
    #[must_use]
    pub const fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// Run `operation` until it succeeds, fails with an error `is_retryable`
    /// rejects, or the attempts are used up.
    ///
    /// `operation` receives the one-based attempt number. The last error is
    /// returned unchanged.
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && is_retryable(&err) => {
                    let delay = self.backoff.delay(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %sanitize_error_text(&err),
                        "Transient failure, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

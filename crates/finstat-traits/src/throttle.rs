//! Fixed-interval call throttle.

use std::{future::Future, time::Duration};
use tokio::{
    sync::Mutex,
    time::{Instant, sleep},
};

/// Enforces a minimum spacing of `period / max_calls` between calls.
///
/// The throttle is opt-in; collectors do not apply it on their own. Share one
/// instance between the call sites that draw from the same quota.
///
/// # Example
///
/// ```no_run
/// use finstat_traits::FixedIntervalThrottle;
/// use std::time::Duration;
///
/// # async fn example() {
/// // Stay at or below 5 requests per minute.
/// let throttle = FixedIntervalThrottle::new(5, Duration::from_secs(60));
/// for ticker in ["AAPL", "MSFT"] {
///     throttle.call(|| async move { println!("fetching {ticker}") }).await;
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct FixedIntervalThrottle {
    min_interval: Duration,
    last_finished: Mutex<Option<Instant>>,
}

impl FixedIntervalThrottle {
    /// Allow at most `max_calls` per `period`. A `max_calls` of zero is treated as one.
    #[must_use]
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self::with_interval(period / max_calls.max(1))
    }

    /// Space calls at least `min_interval` apart.
    #[must_use]
    pub const fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_finished: Mutex::const_new(None),
        }
    }

    /// The enforced spacing between calls.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Run `f` once the interval since the previous call has elapsed.
    ///
    /// The interval is measured from the moment the previous call finished.
    /// Calls are serialized: a second caller waits for the first to finish.
    pub async fn call<F, Fut, T>(&self, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut last = self.last_finished.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        let output = f().await;
        *last = Some(Instant::now());
        output
    }

    /// Wait until the next call is allowed and count it as made now.
    pub async fn wait(&self) {
        self.call(|| async {}).await;
    }
}

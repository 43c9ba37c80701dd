//! Bounded exponential back-off for upstream calls.
//!
//! A `RetryPolicy` re-runs an operation while its error is retryable, sleeping
//! a jittered, exponentially growing interval between attempts. The loop is
//! bounded by wall-clock time rather than attempt count: once the next sleep
//! would cross `max_elapsed`, the last error is returned.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::{Instant, sleep};
use tracing::warn;

use crate::error::UpstreamError;

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for UpstreamError {
    fn is_retryable(&self) -> bool {
        self.kind.is_transient()
    }
}

/// Result of running an operation under a policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempted<T, E> {
    pub result: Result<T, E>,
    /// Number of times the operation ran, at least 1
    pub attempts: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub multiplier: f64,
    pub max_interval: Duration,
    /// Wall-clock budget for all attempts of one operation
    pub max_elapsed: Duration,
    /// Full jitter: each sleep is uniform in `[0, interval]`
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 2.0,
            max_interval: Duration::from_secs(16),
            max_elapsed: Duration::from_secs(32),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    pub fn with_max_elapsed(mut self, elapsed: Duration) -> Self {
        self.max_elapsed = elapsed;
        self
    }

    /// Sleep exactly the back-off interval instead of a random fraction.
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// The un-jittered interval before retry number `retry` (0-based).
    pub fn interval(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(retry.min(64) as i32);
        let scaled = self.initial_interval.as_secs_f64() * factor;
        let capped = scaled.min(self.max_interval.as_secs_f64());
        Duration::from_secs_f64(capped.max(0.0))
    }

    fn delay(&self, retry: u32) -> Duration {
        let interval = self.interval(retry);
        if !self.jitter {
            return interval;
        }
        let ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::rng().random_range(0..=ms))
    }

    /// Run `op` until it succeeds, fails permanently or the budget runs out.
    ///
    /// `object_id` identifies the record in retry warnings.
    pub async fn run<T, E, F, Fut>(&self, object_id: &str, mut op: F) -> Attempted<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let start = Instant::now();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let err = match op().await {
                Ok(value) => {
                    return Attempted {
                        result: Ok(value),
                        attempts,
                        elapsed: start.elapsed(),
                    };
                }
                Err(err) => err,
            };

            let elapsed = start.elapsed();
            let delay = self.delay(attempts - 1);
            if !err.is_retryable() || elapsed + delay > self.max_elapsed {
                return Attempted {
                    result: Err(err),
                    attempts,
                    elapsed,
                };
            }

            warn!(
                object_id,
                attempt = attempts,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "Retryable error, will retry"
            );
            sleep(delay).await;
        }
    }
}

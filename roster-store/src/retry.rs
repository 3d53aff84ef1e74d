//! Exponential backoff for per-record store operations.

use std::time::Duration;

use roster_core::RetryConfig;

use crate::error::StoreError;

/// Retry settings applied to every individual record write or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Delay multiplier applied after each failed attempt.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no sleeping.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Run `op` until it succeeds, fails with a non-transient error, or
    /// `max_attempts` is reached. The last error is returned.
    pub fn retry<T, F>(&self, label: &str, mut op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Result<T, StoreError>,
    {
        let mut attempt = 0;
        let mut delay = self.initial_delay;

        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.max_attempts || !err.is_transient() {
                        return Err(err);
                    }

                    tracing::warn!(
                        op = label,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying store operation"
                    );
                    std::thread::sleep(delay);
                    delay = delay.saturating_mul(self.multiplier).min(self.max_delay);
                }
            }
        }
    }
}

//! Backoff schedule for webhook delivery.

use std::time::Duration;

/// Attempt budget and doubling backoff for one delivery.
///
/// The wait before retry `n` (0-indexed) is `min(base_delay * 2^n, 300s)`.
/// No wait follows the final attempt.
///
/// # Example
///
/// ```
/// use roomwatch::webhook::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(5, Duration::from_secs(1));
///
/// assert_eq!(policy.delay_for_retry(3), Duration::from_secs(8));
/// assert_eq!(policy.delay_for_retry(20), RetryPolicy::MAX_DELAY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Ceiling for any single wait.
    pub const MAX_DELAY: Duration = Duration::from_secs(300);

    /// Creates a policy. An attempt budget of 0 is raised to 1.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: if max_attempts == 0 { 1 } else { max_attempts },
            base_delay,
        }
    }

    /// Attempts per delivery, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before the first retry.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Wait before retry `retry` (0 = between the first and second attempt).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        1u32.checked_shl(retry)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(Self::MAX_DELAY, |delay| delay.min(Self::MAX_DELAY))
    }

    /// Returns true if another attempt may follow attempt number `attempt`
    /// (1 = first attempt).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

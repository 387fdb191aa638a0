//! Bounded retry schedule
//!
//! Retry control flow is data, not loop shape: the connector asks this
//! schedule whether an attempt counter is exhausted and what the next delay
//! is, so the policy is testable without sleeping.

use std::time::Duration;

/// Exponential backoff schedule for transient remote errors
///
/// Attempt `n` (zero-based) backs off for `base_delay * 2^n`. Rate-limit
/// responses may carry a `Retry-After` hint; the effective delay is the
/// larger of the hint and the computed backoff.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Base delay for the exponential schedule
    pub base_delay: Duration,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetrySchedule {
    /// Whether the given zero-based attempt counter has used up the budget
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt >= self.max_retries
    }

    /// Exponential delay for the given attempt
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }

    /// Delay for a rate-limited attempt, honoring a server hint when larger
    pub fn rate_limit_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.backoff_delay(attempt);
        match retry_after {
            Some(hint) => hint.max(backoff),
            None => backoff,
        }
    }
}

/// Parse a `Retry-After` header value (whole seconds)
///
/// Malformed values yield `None`, deferring to the exponential schedule.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

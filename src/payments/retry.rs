//! Retry eligibility and exponential backoff for provider calls.
//!
//! Nothing here sleeps or loops; callers own the retry schedule and use these
//! helpers to decide whether and when to try again.

use crate::payments::error_details::ProviderFailure;
use std::time::Duration;

pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
pub const MAX_BACKOFF_DELAY_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// `base_delay * 2^retry_count`, capped at `max_delay`.
    pub fn delay_for(&self, retry_count: u32) -> Duration {
        let base = self.base_delay.as_millis().min(u64::MAX as u128) as u64;
        let cap = self.max_delay.as_millis().min(u64::MAX as u128) as u64;
        Duration::from_millis(capped_exponential(retry_count, base, cap))
    }
}

/// Delay in milliseconds before retry number `retry_count` (0-based).
///
/// | retry | delay (base 1000ms) |
/// |-------|---------------------|
/// | 0     | 1 s                 |
/// | 1     | 2 s                 |
/// | 2     | 4 s                 |
/// | 3     | 8 s                 |
/// | 4     | 16 s                |
/// | ≥ 5   | 30 s                |
pub fn backoff_delay(retry_count: u32, base_delay_ms: u64) -> u64 {
    capped_exponential(retry_count, base_delay_ms, MAX_BACKOFF_DELAY_MS)
}

fn capped_exponential(retry_count: u32, base: u64, cap: u64) -> u64 {
    2u64.checked_pow(retry_count)
        .and_then(|factor| factor.checked_mul(base))
        .map_or(cap, |delay| delay.min(cap))
}

/// HTTP statuses worth retrying: server errors and rate limiting.
pub fn is_retryable_status(status: u16) -> bool {
    status >= 500 || status == 429 || status == 504
}

/// A failure is retryable when no response arrived at all, or when the
/// provider answered with a retryable status.
pub fn is_retryable(error: &ProviderFailure) -> bool {
    match error.status_code() {
        None => true,
        Some(status) => is_retryable_status(status),
    }
}

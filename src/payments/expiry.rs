use crate::payments::types::TimeoutSpec;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TIMEOUT_MINUTES: u32 = 3;
/// Providers are polled at a fixed cadence while a payment is pending.
pub const POLL_INTERVAL_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub timeout_minutes: u32,
    pub poll_interval_secs: u32,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            timeout_minutes: DEFAULT_TIMEOUT_MINUTES,
            poll_interval_secs: POLL_INTERVAL_SECS,
        }
    }
}

impl TimeoutPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::minutes(i64::from(self.timeout_minutes))
    }

    /// `true` once `now` is strictly past `created_at + timeout`. A deadline
    /// beyond the representable range never expires.
    pub fn is_expired_at(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at
            .checked_add_signed(self.timeout())
            .map_or(false, |deadline| now > deadline)
    }

    pub fn compute(&self, now: DateTime<Utc>) -> TimeoutSpec {
        let expires_in_seconds = u64::from(self.timeout_minutes) * 60;
        let max_polling_attempts = match self.poll_interval_secs {
            0 => 0,
            interval => {
                let attempts = expires_in_seconds / u64::from(interval);
                attempts.min(u64::from(u32::MAX)) as u32
            }
        };
        let expires_at = now
            .checked_add_signed(self.timeout())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        TimeoutSpec {
            expires_at: expires_at.timestamp_millis(),
            expires_in_seconds,
            max_polling_attempts,
        }
    }
}

pub fn is_expired(created_at: DateTime<Utc>, timeout_minutes: u32) -> bool {
    TimeoutPolicy {
        timeout_minutes,
        ..TimeoutPolicy::default()
    }
    .is_expired_at(created_at, Utc::now())
}

/// Deadline and polling budget for a payment started now.
pub fn compute_timeout(timeout_minutes: u32) -> TimeoutSpec {
    TimeoutPolicy {
        timeout_minutes,
        ..TimeoutPolicy::default()
    }
    .compute(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_detection_is_correct() {
        let now = Utc::now();
        assert!(is_expired(now - Duration::minutes(4), 3));
        assert!(!is_expired(now - Duration::minutes(1), 3));
    }

    #[test]
    fn boundary_is_not_expired() {
        let policy = TimeoutPolicy::default();
        let created = Utc::now();
        let deadline = created + Duration::minutes(3);
        assert!(!policy.is_expired_at(created, deadline));
        assert!(policy.is_expired_at(created, deadline + Duration::milliseconds(1)));
    }

    #[test]
    fn deadline_past_max_utc_does_not_overflow() {
        let policy = TimeoutPolicy::default();
        assert!(!is_expired(DateTime::<Utc>::MAX_UTC, 3));
        assert!(!policy.is_expired_at(DateTime::<Utc>::MAX_UTC, DateTime::<Utc>::MAX_UTC));

        let spec = policy.compute(DateTime::<Utc>::MAX_UTC);
        assert_eq!(spec.expires_at, DateTime::<Utc>::MAX_UTC.timestamp_millis());
        assert_eq!(spec.max_polling_attempts, 36);
    }

    #[test]
    fn default_timeout_budget() {
        let now = Utc::now();
        let spec = TimeoutPolicy::default().compute(now);
        assert_eq!(spec.expires_in_seconds, 180);
        assert_eq!(spec.max_polling_attempts, 36);
        assert_eq!(spec.expires_at, now.timestamp_millis() + 180_000);
    }

    #[test]
    fn polling_attempts_round_down() {
        let policy = TimeoutPolicy {
            timeout_minutes: 1,
            poll_interval_secs: 7,
        };
        assert_eq!(policy.compute(Utc::now()).max_polling_attempts, 8);
    }

    #[test]
    fn compute_timeout_uses_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let spec = compute_timeout(10);
        assert_eq!(spec.expires_in_seconds, 600);
        assert_eq!(spec.max_polling_attempts, 120);
        assert!(spec.expires_at >= before + 600_000);
    }
}

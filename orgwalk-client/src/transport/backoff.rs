//! Backoff schedule between attempts.

use std::time::Duration;

use orgwalk_core::config::TransportConfig;

/// Exponential backoff with jitter; a server-supplied retry-after wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    base: Duration,
    max_jitter: Duration,
    ceiling: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration, max_jitter: Duration, ceiling: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
            max_jitter,
            ceiling,
        }
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self::new(
            config.max_attempts,
            config.backoff_base(),
            Duration::from_millis(config.max_jitter_ms),
            config.max_backoff(),
        )
    }

    /// Whether a failed attempt numbered `attempt` (1-based) may be followed by another.
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    ///
    /// `retry_after` is honored as given; otherwise `base * 2^attempt` plus
    /// jitter. Either way the result never exceeds the ceiling.
    pub fn delay_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let delay = match retry_after {
            Some(server_delay) => server_delay,
            None => self.exponential(attempt).saturating_add(self.jitter()),
        };
        delay.min(self.ceiling)
    }

    /// The un-jittered component.
    pub fn exponential(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.ceiling)
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(random_u64() % (max_ms + 1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&TransportConfig::default())
    }
}

/// Randomness from a v4 uuid; jitter needs spread, not cryptographic quality.
fn random_u64() -> u64 {
    (uuid::Uuid::new_v4().as_u128() >> 64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(jitter_ms: u64) -> RetryPolicy {
        RetryPolicy::new(
            3,
            Duration::from_millis(250),
            Duration::from_millis(jitter_ms),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn exponential_doubles_per_attempt() {
        let p = policy(0);
        assert_eq!(p.exponential(1), Duration::from_millis(500));
        assert_eq!(p.exponential(2), Duration::from_millis(1000));
        assert_eq!(p.exponential(3), Duration::from_millis(2000));
    }

    #[test]
    fn retry_after_overrides_exponential() {
        let p = policy(250);
        assert_eq!(
            p.delay_for(1, Some(Duration::from_secs(2))),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn jitter_stays_within_bound() {
        let p = policy(100);
        for _ in 0..200 {
            let d = p.delay_for(1, None);
            assert!(d >= Duration::from_millis(500));
            assert!(d <= Duration::from_millis(600));
        }
    }

    #[test]
    fn delays_never_exceed_ceiling() {
        let p = policy(0);
        assert_eq!(p.delay_for(40, None), Duration::from_secs(30));
        assert_eq!(
            p.delay_for(1, Some(Duration::from_secs(3_600))),
            Duration::from_secs(30)
        );
        assert_eq!(p.delay_for(1, Some(Duration::MAX)), Duration::from_secs(30));
    }

    #[test]
    fn attempt_budget_counts_first_try() {
        let p = policy(0);
        assert!(p.can_retry(1));
        assert!(p.can_retry(2));
        assert!(!p.can_retry(3));
        assert_eq!(RetryPolicy::new(0, Duration::ZERO, Duration::ZERO, Duration::ZERO).max_attempts, 1);
    }
}

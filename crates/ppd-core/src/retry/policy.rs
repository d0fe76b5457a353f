use crate::config::RetryConfig;
use rand::Rng;
use std::time::Duration;

/// High-level classification of an error for retry purposes.
///
/// This intentionally stays generic; callers map HTTP status codes, curl
/// errors, or IO failures into these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Server asked us to slow down (e.g. 429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Any other non-2xx HTTP status. Retryable: transient server hiccups
    /// and overzealous anti-bot responses both land here.
    Http(u16),
    /// Any other error (malformed URL, local storage); not retried.
    Other,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy with a cap and uniform random jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on the exponential part of the delay.
    pub max_delay: Duration,
    /// Upper bound of the random jitter added on top of each delay.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            jitter: Duration::from_millis(500),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(cfg.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(cfg.max_delay_secs),
            jitter: Duration::from_secs_f64(cfg.jitter_secs.max(0.0)),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay for a given attempt, before jitter: `base * 2^(attempt-1)`,
    /// capped at `max_delay`. `attempt` is 1-based.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = 1u32.saturating_mul(1 << attempt.saturating_sub(1).min(8));
        let raw = self.base_delay.saturating_mul(exp);
        raw.min(self.max_delay)
    }

    /// Compute the next retry decision for a given attempt and error kind.
    ///
    /// `attempt` is 1-based (1 = first attempt). Returns `RetryDecision::NoRetry`
    /// when we should stop retrying. The returned delay is `backoff(attempt)`
    /// plus a uniform random jitter in `[0, jitter)`.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }

        match kind {
            ErrorKind::Other => RetryDecision::NoRetry,
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Throttled
            | ErrorKind::Http(_) => RetryDecision::RetryAfter(self.backoff(attempt) + self.sample_jitter()),
        }
    }

    fn sample_jitter(&self) -> Duration {
        let max = self.jitter.as_secs_f64();
        if max <= 0.0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(rand::thread_rng().gen_range(0.0..max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_retry_for_other() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1, ErrorKind::Other), RetryDecision::NoRetry);
    }

    #[test]
    fn backoff_grows_and_is_capped() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 20;
        assert!(p.backoff(2) >= p.backoff(1));
        assert!(p.backoff(10) <= p.max_delay);
    }

    #[test]
    fn delay_includes_bounded_jitter() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 20;
        for attempt in 1..5 {
            let d = match p.decide(attempt, ErrorKind::Timeout) {
                RetryDecision::RetryAfter(d) => d,
                _ => panic!("expected retry"),
            };
            assert!(d >= p.backoff(attempt));
            assert!(d < p.backoff(attempt) + p.jitter);
        }
    }

    #[test]
    fn respects_max_attempts() {
        let mut p = RetryPolicy::default();
        p.max_attempts = 3;
        assert!(matches!(
            p.decide(1, ErrorKind::Throttled),
            RetryDecision::RetryAfter(_)
        ));
        assert!(matches!(
            p.decide(2, ErrorKind::Http(500)),
            RetryDecision::RetryAfter(_)
        ));
        assert_eq!(p.decide(3, ErrorKind::Throttled), RetryDecision::NoRetry);
    }

    #[test]
    fn config_conversion_clamps() {
        let cfg = RetryConfig {
            max_attempts: 0,
            base_delay_secs: -1.0,
            max_delay_secs: 10,
            jitter_secs: 0.0,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_attempts, 1);
        assert_eq!(p.base_delay, Duration::ZERO);
        assert_eq!(p.jitter, Duration::ZERO);
        assert_eq!(p.decide(1, ErrorKind::Timeout), RetryDecision::NoRetry);
    }
}

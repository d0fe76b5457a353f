//! Inter-request pacing.
//!
//! The remote site is a free community resource; the pacer enforces a
//! randomized minimum gap between consecutive outbound requests. Callers
//! must invoke [`Pacer::pause`] immediately before every request, including
//! retries; backoff sleeps stack on top of the pacing gap, they do not
//! replace it.

use crate::config::PacingConfig;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Pacer {
    min_delay: Duration,
    max_delay: Duration,
    last_request: Option<Instant>,
}

impl Pacer {
    /// `max_delay` is raised to `min_delay` if the interval is inverted.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            last_request: None,
        }
    }

    /// Blocks until at least a randomly drawn gap from `[min_delay, max_delay]`
    /// has elapsed since the previous `pause` call, then records the new
    /// request start. The first call never sleeps.
    pub fn pause(&mut self) {
        if let Some(last) = self.last_request {
            let gap = self.sample_gap();
            let elapsed = last.elapsed();
            if elapsed < gap {
                std::thread::sleep(gap - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    fn sample_gap(&self) -> Duration {
        if self.max_delay > self.min_delay {
            let secs = rand::thread_rng()
                .gen_range(self.min_delay.as_secs_f64()..self.max_delay.as_secs_f64());
            Duration::from_secs_f64(secs)
        } else {
            self.min_delay
        }
    }
}

impl From<&PacingConfig> for Pacer {
    fn from(cfg: &PacingConfig) -> Self {
        Self::new(
            Duration::from_secs_f64(cfg.min_delay_secs.max(0.0)),
            Duration::from_secs_f64(cfg.max_delay_secs.max(0.0)),
        )
    }
}

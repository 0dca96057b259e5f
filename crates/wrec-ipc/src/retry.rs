//! Bounded Retry
//!
//! Fixed-interval polling with a hard attempt budget. Exhausting the
//! budget is the one failure in this crate callers must handle; nothing
//! here retries forever.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Polling policy: fixed interval, bounded attempt count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Worst-case wall clock spent before the wait fails
    pub fn budget(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

impl Default for RetryPolicy {
    /// 200 ms between probes, 100 attempts: a ~20 second budget
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            max_attempts: 100,
        }
    }
}

/// A bounded wait exhausted its attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no response after {attempts} attempts")]
pub struct WaitTimeout {
    pub attempts: u32,
}

/// Poll `probe` until it yields a value, sleeping `policy.interval`
/// between attempts. Fails once `policy.max_attempts` probes have come
/// up empty.
pub async fn wait_until<T>(
    policy: RetryPolicy,
    mut probe: impl FnMut() -> Option<T>,
) -> Result<T, WaitTimeout> {
    for attempt in 0..policy.max_attempts {
        if let Some(value) = probe() {
            return Ok(value);
        }
        if attempt + 1 < policy.max_attempts {
            smol::Timer::after(policy.interval).await;
        }
    }
    tracing::debug!(attempts = policy.max_attempts, "bounded wait exhausted");
    Err(WaitTimeout {
        attempts: policy.max_attempts,
    })
}

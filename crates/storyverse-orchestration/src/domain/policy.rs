//! Timeout and retry policy for command actions.

use std::time::Duration;

/// Default hard budget for one attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default total number of attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
/// Default backoff unit; attempt `n` waits `n` units before retrying.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(150);

/// How a command action bounds and retries one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPolicy {
    /// Wall-clock budget per attempt. Expiry is final and never retried.
    pub timeout: Duration,
    /// Total attempts for non-timeout failures. Never less than one.
    pub max_attempts: u32,
    /// Linear backoff unit between attempts.
    pub retry_base_delay: Duration,
}

impl Default for ActionPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl ActionPolicy {
    /// Creates a policy. `max_attempts` is raised to one if zero.
    #[must_use]
    pub fn new(timeout: Duration, max_attempts: u32, retry_base_delay: Duration) -> Self {
        Self {
            timeout,
            max_attempts: max_attempts.max(1),
            retry_base_delay,
        }
    }

    /// Delay before the attempt following `attempt` (1-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.retry_base_delay.saturating_mul(attempt)
    }
}

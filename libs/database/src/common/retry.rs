use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff schedule for retrying a fallible async operation.
///
/// Delays double after each failed attempt and are capped at `max_delay`.
/// Jitter spreads the actual sleeps so several instances restarting at the
/// same moment do not reconnect in lockstep.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first try included
    pub attempts: u32,
    /// Delay after the first failure
    pub first_delay: Duration,
    /// Ceiling for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Schedule used while waiting for the database during startup:
    /// five attempts, 200ms initial delay, capped at 5s.
    pub fn startup() -> Self {
        Self {
            attempts: 5,
            first_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_first_delay(mut self, delay: Duration) -> Self {
        self.first_delay = delay;
        self
    }

    /// Delay to sleep after the `failures`-th failed attempt (1-based),
    /// jitter applied.
    fn delay_after(&self, failures: u32) -> Duration {
        let doublings = failures.saturating_sub(1).min(16);
        let exponential = self.first_delay.saturating_mul(1 << doublings);
        jittered(exponential.min(self.max_delay))
    }
}

/// Scale a delay by a factor in [0.5, 1.0).
///
/// Hashing the clock is randomness enough to de-synchronize restarts
/// without pulling in an RNG crate.
fn jittered(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let h = RandomState::new().hash_one(std::time::SystemTime::now());
    delay.mul_f64(0.5 + (h % 512) as f64 / 1024.0)
}

/// Run `operation` until it succeeds or the policy's attempts are spent.
///
/// The last error is returned unchanged, so callers keep their concrete
/// error type.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(error) if attempt < policy.attempts => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt,
                    remaining = policy.attempts - attempt,
                    %error,
                    ?delay,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => {
                warn!(attempts = policy.attempts, %error, "Operation failed, giving up");
                return Err(error);
            }
        }
    }
}

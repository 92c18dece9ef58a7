// Caller-side retry policy with exponential backoff
//
// The management client never retries on its own. Callers that want retries
// wrap individual calls, e.g.
// `policy.execute_async(|| client.role_exists("temp_role")).await`.

use crate::error::EdgeError;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay,
        }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or `max_attempts` is reached. The last error is returned.
    pub async fn execute_async<F, T, Fut>(&self, mut operation: F) -> Result<T, EdgeError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, EdgeError>>,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(err) if attempt >= self.max_attempts => return Err(err),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    let delay = self.calculate_delay(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying");
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        exponential.min(self.max_delay)
    }
}

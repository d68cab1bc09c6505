use crate::error::SourceError;
use movieflix_config::HttpConfig;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Request timeout plus a bounded retry on transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub backoff: Duration,
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(http: &HttpConfig) -> Self {
        Self {
            timeout: Duration::from_secs(http.timeout_secs),
            backoff: Duration::from_millis(http.retry_backoff_ms),
            max_retries: 1,
        }
    }

    /// Run `op`, retrying after `backoff` while the error is transient and
    /// retries remain. The last error is returned as-is.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        "{} failed ({}), retrying in {}ms (attempt {}/{})",
                        label,
                        e,
                        self.backoff.as_millis(),
                        attempt,
                        self.max_retries
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_secs(1),
            backoff: Duration::from_millis(0),
            max_retries: 1,
        }
    }

    fn http(status: u16) -> SourceError {
        SourceError::Http {
            service: "TMDB",
            path: "/x".to_string(),
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_policy_from_config() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.timeout, Duration::from_secs(10));
        assert_eq!(policy.backoff, Duration::from_millis(500));
        assert_eq!(policy.max_retries, 1);
    }

    #[tokio::test]
    async fn test_transient_error_retried_once() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, _> = policy()
            .run("test", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    Err(http(503))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_single_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = policy()
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(http(429))
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(429));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_error_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = policy()
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(http(404))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

use crate::ports::DnsResolver;
use dns_kraken_domain::{QueryOutcome, QueryTarget, ResolutionResult, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Final result of one target after the retry loop, with the number of
/// attempts it took.
#[derive(Debug, Clone)]
pub struct RetriedResolution {
    pub result: ResolutionResult,
    pub attempts: u32,
}

/// Runs a [`DnsResolver`] under a [`RetryPolicy`].
///
/// Cancellation cuts backoff sleeps short: the target then reports the
/// outcome of its last completed attempt. An attempt already in flight is
/// never interrupted.
#[derive(Clone)]
pub struct RetryingResolver {
    resolver: Arc<dyn DnsResolver>,
    policy: Arc<RetryPolicy>,
    attempt_timeout: Option<Duration>,
    cancel: CancellationToken,
}

impl RetryingResolver {
    pub fn new(resolver: Arc<dyn DnsResolver>, policy: Arc<RetryPolicy>) -> Self {
        Self {
            resolver,
            policy,
            attempt_timeout: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Bounds each attempt; an overrun counts as `Timeout`.
    pub fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_policy(mut self, policy: Arc<RetryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn resolve(&self, target: &QueryTarget) -> RetriedResolution {
        let mut attempt = 1;

        loop {
            let result = self.attempt(target).await;
            let outcome = result.outcome();

            if !self.policy.should_retry(attempt, outcome) {
                return RetriedResolution {
                    result,
                    attempts: attempt,
                };
            }

            let delay = self.policy.delay_after(attempt);
            debug!(
                target = %target,
                attempt = attempt,
                outcome = %outcome,
                delay_ms = delay.as_millis() as u64,
                "Retrying query"
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = self.cancel.cancelled() => {
                    debug!(target = %target, attempt = attempt, "Retry abandoned after cancellation");
                    return RetriedResolution {
                        result,
                        attempts: attempt,
                    };
                }
            }

            attempt += 1;
        }
    }

    async fn attempt(&self, target: &QueryTarget) -> ResolutionResult {
        match self.attempt_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.resolver.resolve(target)).await {
                Ok(result) => result,
                Err(_) => {
                    debug!(target = %target, limit_ms = limit.as_millis() as u64, "Attempt timed out");
                    ResolutionResult::failed(target.clone(), QueryOutcome::Timeout)
                }
            },
            None => self.resolver.resolve(target).await,
        }
    }
}

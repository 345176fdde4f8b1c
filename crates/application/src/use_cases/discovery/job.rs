use dns_kraken_domain::{DomainError, QueryTarget, RecordType, RetryPolicy};
use futures::Stream;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 20;

/// One brute-force run: a domain and the lazily produced labels to try
/// under it.
///
/// Candidates are always queried for `A` records.
pub struct DiscoveryJob<S> {
    pub(crate) domain: QueryTarget,
    pub(crate) candidates: S,
    pub(crate) concurrency: usize,
    pub(crate) retry_policy: RetryPolicy,
    pub(crate) attempt_timeout: Option<Duration>,
}

impl<S> DiscoveryJob<S>
where
    S: Stream<Item = String>,
{
    pub fn new(domain: &str, candidates: S) -> Result<Self, DomainError> {
        Ok(Self {
            domain: QueryTarget::new(domain, RecordType::A)?,
            candidates,
            concurrency: DEFAULT_CONCURRENCY,
            retry_policy: RetryPolicy::default(),
            attempt_timeout: None,
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, DomainError> {
        if concurrency == 0 {
            return Err(DomainError::InvalidJob(
                "concurrency must be at least 1".to_string(),
            ));
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = Some(attempt_timeout);
        self
    }

    pub fn domain(&self) -> &str {
        self.domain.host()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }
}

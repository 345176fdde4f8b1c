use async_trait::async_trait;
use dns_kraken_domain::{QueryTarget, ResolutionResult};

/// One logical DNS query, with every failure normalized into the result's
/// outcome.
///
/// Implementations never retry internally; retries belong to
/// [`RetryingResolver`](crate::services::RetryingResolver).
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, target: &QueryTarget) -> ResolutionResult;
}

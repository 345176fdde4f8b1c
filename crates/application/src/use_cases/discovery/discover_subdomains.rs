use super::event::{DiscoveryCounters, DiscoveryEvent, DiscoveryStats};
use super::job::DiscoveryJob;
use crate::ports::DnsResolver;
use crate::services::{RetriedResolution, RetryingResolver};
use dns_kraken_domain::{QueryOutcome, QueryTarget, RecordType, WildcardBaseline};
use futures::future;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Brute-force subdomain discovery.
///
/// At most `job.concurrency` candidates are resolving at any instant, and the
/// candidate stream is only polled when a slot frees up. Results matching the
/// wildcard baseline are suppressed; `Nxdomain` and `NoAnswer` are dropped.
pub struct SubdomainDiscovery {
    resolver: Arc<dyn DnsResolver>,
    cancel: CancellationToken,
    counters: Arc<DiscoveryCounters>,
}

impl SubdomainDiscovery {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            resolver,
            cancel: CancellationToken::new(),
            counters: Arc::new(DiscoveryCounters::default()),
        }
    }

    /// Once `cancel` fires no further candidates are dispatched and pending
    /// backoff sleeps end; in-flight queries still complete.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Totals over every run started from this engine.
    pub fn stats(&self) -> DiscoveryStats {
        self.counters.snapshot()
    }

    pub fn discover<S>(
        &self,
        job: DiscoveryJob<S>,
        baseline: Arc<WildcardBaseline>,
    ) -> impl Stream<Item = DiscoveryEvent> + Send + 'static
    where
        S: Stream<Item = String> + Send + 'static,
    {
        let DiscoveryJob {
            domain,
            candidates,
            concurrency,
            retry_policy,
            attempt_timeout,
        } = job;

        info!(
            domain = %domain.host(),
            concurrency = concurrency,
            max_attempts = retry_policy.max_attempts(),
            wildcard = baseline.is_wildcard(),
            "Starting subdomain discovery"
        );

        let retrying = RetryingResolver::new(Arc::clone(&self.resolver), Arc::new(retry_policy))
            .with_attempt_timeout(attempt_timeout)
            .with_cancellation(self.cancel.clone());
        let skip_counters = Arc::clone(&self.counters);
        let counters = Arc::clone(&self.counters);

        candidates
            .take_until(self.cancel.clone().cancelled_owned())
            .filter_map(move |label| {
                let target = match QueryTarget::subdomain(&label, domain.host(), RecordType::A) {
                    Ok(target) => Some(target),
                    Err(e) => {
                        warn!(candidate = %label, error = %e, "Skipping invalid candidate");
                        DiscoveryCounters::bump(&skip_counters.skipped);
                        None
                    }
                };
                future::ready(target)
            })
            .map(move |target| {
                let retrying = retrying.clone();
                async move { retrying.resolve(&target).await }
            })
            .buffer_unordered(concurrency)
            .filter_map(move |resolution| future::ready(classify(&baseline, &counters, resolution)))
    }
}

fn classify(
    baseline: &WildcardBaseline,
    counters: &DiscoveryCounters,
    resolution: RetriedResolution,
) -> Option<DiscoveryEvent> {
    let RetriedResolution { result, attempts } = resolution;

    match result.outcome() {
        QueryOutcome::Success if baseline.is_false_positive(&result) => {
            debug!(target = %result.target(), "Suppressed wildcard answer");
            DiscoveryCounters::bump(&counters.suppressed);
            None
        }
        QueryOutcome::Success => {
            debug!(target = %result.target(), records = result.records().len(), "Subdomain found");
            DiscoveryCounters::bump(&counters.found);
            Some(DiscoveryEvent::Found { result, attempts })
        }
        QueryOutcome::NoAnswer | QueryOutcome::Nxdomain => {
            DiscoveryCounters::bump(&counters.dropped);
            None
        }
        QueryOutcome::Timeout | QueryOutcome::ServerFailure | QueryOutcome::Refused => {
            debug!(
                target = %result.target(),
                outcome = %result.outcome(),
                attempts = attempts,
                "Candidate unresolved"
            );
            DiscoveryCounters::bump(&counters.unresolved);
            Some(DiscoveryEvent::Unresolved { result, attempts })
        }
    }
}

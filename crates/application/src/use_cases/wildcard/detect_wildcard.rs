use crate::ports::DnsResolver;
use crate::services::RetryingResolver;
use dns_kraken_domain::{
    DomainError, QueryOutcome, QueryTarget, RecordType, RetryPolicy, WildcardBaseline,
};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_SAMPLES: usize = 3;
pub const SAMPLE_LABEL_LEN: usize = 20;

/// Random lowercase alphanumeric label, long enough that no real zone
/// holds it.
pub fn random_label() -> String {
    std::iter::repeat_with(fastrand::alphanumeric)
        .take(SAMPLE_LABEL_LEN)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Queries random labels under a zone and collects what comes back.
///
/// Each query runs under the same retry policy as discovery. A record
/// type for which every query ended in a failure is reported as
/// undetermined on the baseline rather than as "no wildcard".
pub struct DetectWildcardUseCase {
    resolver: RetryingResolver,
    samples: usize,
}

impl DetectWildcardUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            resolver: RetryingResolver::new(resolver, Arc::new(RetryPolicy::default())),
            samples: DEFAULT_SAMPLES,
        }
    }

    /// Number of random labels queried per record type (at least one).
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.resolver = self.resolver.with_policy(Arc::new(policy));
        self
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.resolver = self.resolver.with_attempt_timeout(attempt_timeout);
        self
    }

    #[instrument(skip(self, record_types))]
    pub async fn execute(
        &self,
        domain: &str,
        record_types: &[RecordType],
    ) -> Result<WildcardBaseline, DomainError> {
        let zone = QueryTarget::new(domain, RecordType::A)?;
        let mut baseline = WildcardBaseline::none();

        for &record_type in record_types {
            let targets = (0..self.samples)
                .map(|_| QueryTarget::subdomain(&random_label(), zone.host(), record_type))
                .collect::<Result<Vec<_>, _>>()?;

            let resolved =
                join_all(targets.iter().map(|target| self.resolver.resolve(target))).await;

            let mut definitive = 0;
            let mut last_failure = None;
            for retried in resolved {
                let result = retried.result;
                match result.outcome() {
                    QueryOutcome::Success => {
                        debug!(
                            name = %result.target(),
                            records = result.records().len(),
                            "Random label answered"
                        );
                        definitive += 1;
                        baseline.record_sample(record_type, result.records().iter().cloned());
                    }
                    QueryOutcome::Nxdomain | QueryOutcome::NoAnswer => definitive += 1,
                    outcome => {
                        warn!(
                            name = %result.target(),
                            outcome = %outcome,
                            attempts = retried.attempts,
                            "Wildcard query failed"
                        );
                        last_failure = Some(outcome);
                    }
                }
            }

            if let (0, Some(outcome)) = (definitive, last_failure) {
                warn!(
                    domain = %zone.host(),
                    record_type = %record_type,
                    outcome = %outcome,
                    "Wildcard status undetermined"
                );
                baseline.mark_undetermined(record_type, outcome);
            }
        }

        info!(
            domain = %zone.host(),
            wildcard = baseline.is_wildcard(),
            undetermined = baseline.undetermined().count(),
            "Wildcard detection finished"
        );

        Ok(baseline)
    }
}

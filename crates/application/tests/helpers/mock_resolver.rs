#![allow(dead_code)]

use async_trait::async_trait;
use dns_kraken_application::ports::DnsResolver;
use dns_kraken_domain::{QueryOutcome, QueryTarget, RData, RecordType, ResolutionResult};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

type Key = (String, RecordType);

fn key(name: &str, record_type: RecordType) -> Key {
    let mut name = name.trim_end_matches('.').to_ascii_lowercase();
    name.push('.');
    (name, record_type)
}

fn rdata(records: &[&str]) -> Vec<RData> {
    records.iter().map(|r| RData::from(*r)).collect()
}

// ============================================================================
// Mock DnsResolver
// ============================================================================

/// Scriptable resolver. Unknown names answer `Nxdomain`.
#[derive(Clone, Default)]
pub struct MockResolver {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    answers: Mutex<HashMap<Key, Vec<RData>>>,
    sequences: Mutex<HashMap<Key, VecDeque<QueryOutcome>>>,
    fixed: Mutex<HashMap<Key, QueryOutcome>>,
    wildcards: Mutex<Vec<(String, RecordType, Vec<RData>)>>,
    zone_outcomes: Mutex<Vec<(String, RecordType, QueryOutcome)>>,
    latency: Mutex<Duration>,
    calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(self, name: &str, record_type: RecordType, records: &[&str]) -> Self {
        self.inner
            .answers
            .lock()
            .unwrap()
            .insert(key(name, record_type), rdata(records));
        self
    }

    /// Every name under `zone` without its own answer gets `records`.
    pub fn with_wildcard(self, zone: &str, record_type: RecordType, records: &[&str]) -> Self {
        let (zone, _) = key(zone, record_type);
        self.inner
            .wildcards
            .lock()
            .unwrap()
            .push((zone, record_type, rdata(records)));
        self
    }

    /// Outcomes returned on successive calls before falling back to the
    /// configured answer. A `Success` entry returns the configured answer.
    pub fn with_outcome_sequence(
        self,
        name: &str,
        record_type: RecordType,
        outcomes: &[QueryOutcome],
    ) -> Self {
        self.inner
            .sequences
            .lock()
            .unwrap()
            .insert(key(name, record_type), outcomes.iter().copied().collect());
        self
    }

    /// Outcome returned on every call.
    pub fn with_fixed_outcome(self, name: &str, record_type: RecordType, outcome: QueryOutcome) -> Self {
        self.inner
            .fixed
            .lock()
            .unwrap()
            .insert(key(name, record_type), outcome);
        self
    }

    /// Every name under `zone` fails with `outcome` on every call.
    pub fn with_zone_outcome(self, zone: &str, record_type: RecordType, outcome: QueryOutcome) -> Self {
        let (zone, _) = key(zone, record_type);
        self.inner
            .zone_outcomes
            .lock()
            .unwrap()
            .push((zone, record_type, outcome));
        self
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        *self.inner.latency.lock().unwrap() = latency;
        self
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }

    pub fn calls_for(&self, name: &str) -> Vec<Instant> {
        let (name, _) = key(name, RecordType::A);
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| *n == name)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn queried_names(&self) -> Vec<String> {
        self.inner
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.inner.max_in_flight.load(Ordering::SeqCst)
    }

    fn answer(&self, target: &QueryTarget) -> ResolutionResult {
        let k = key(target.name(), target.record_type());

        if let Some(outcome) = self.inner.fixed.lock().unwrap().get(&k) {
            return self.with_outcome(target, *outcome, &k);
        }

        let zone_outcome = self
            .inner
            .zone_outcomes
            .lock()
            .unwrap()
            .iter()
            .find(|(zone, record_type, _)| *record_type == k.1 && k.0.ends_with(&format!(".{zone}")))
            .map(|(_, _, outcome)| *outcome);
        if let Some(outcome) = zone_outcome {
            return ResolutionResult::failed(target.clone(), outcome);
        }

        let scripted = self
            .inner
            .sequences
            .lock()
            .unwrap()
            .get_mut(&k)
            .and_then(|seq| seq.pop_front());
        if let Some(outcome) = scripted {
            return self.with_outcome(target, outcome, &k);
        }

        self.configured(target, &k)
    }

    fn with_outcome(&self, target: &QueryTarget, outcome: QueryOutcome, k: &Key) -> ResolutionResult {
        match outcome {
            QueryOutcome::Success => self.configured(target, k),
            other => ResolutionResult::failed(target.clone(), other),
        }
    }

    fn configured(&self, target: &QueryTarget, k: &Key) -> ResolutionResult {
        if let Some(records) = self.inner.answers.lock().unwrap().get(k) {
            return ResolutionResult::answered(target.clone(), records.clone());
        }

        let wildcards = self.inner.wildcards.lock().unwrap();
        let hit = wildcards.iter().find(|(zone, record_type, _)| {
            *record_type == target.record_type() && target.name().ends_with(&format!(".{zone}"))
        });
        match hit {
            Some((_, _, records)) => ResolutionResult::answered(target.clone(), records.clone()),
            None => ResolutionResult::failed(target.clone(), QueryOutcome::Nxdomain),
        }
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn resolve(&self, target: &QueryTarget) -> ResolutionResult {
        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.inner
            .calls
            .lock()
            .unwrap()
            .push((target.name().to_string(), Instant::now()));

        let latency = *self.inner.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let result = self.answer(target);
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

use super::{QueryOutcome, RData, RecordType, ResolutionResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Answers a zone gives for names that cannot exist.
///
/// Built once per discovery run by probing random labels, then shared
/// read-only with every resolution task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardBaseline {
    is_wildcard: bool,
    sample_records: HashMap<RecordType, BTreeSet<RData>>,
    undetermined: BTreeMap<RecordType, QueryOutcome>,
}

impl WildcardBaseline {
    /// Baseline for a zone without wildcard answers.
    pub fn none() -> Self {
        Self::default()
    }

    /// Adds the answer for one random label. Empty answers are ignored.
    pub fn record_sample<I>(&mut self, record_type: RecordType, records: I)
    where
        I: IntoIterator<Item = RData>,
    {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return;
        }
        self.is_wildcard = true;
        self.sample_records
            .entry(record_type)
            .or_default()
            .extend(records);
    }

    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    pub fn sample_records(&self, record_type: RecordType) -> Option<&BTreeSet<RData>> {
        self.sample_records.get(&record_type)
    }

    /// Record types that answered random-label queries.
    pub fn record_types(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.sample_records.keys().copied()
    }

    /// Marks a record type for which no random label got a definitive
    /// answer, keeping the last failure seen.
    pub fn mark_undetermined(&mut self, record_type: RecordType, outcome: QueryOutcome) {
        self.undetermined.insert(record_type, outcome);
    }

    pub fn is_determined(&self, record_type: RecordType) -> bool {
        !self.undetermined.contains_key(&record_type)
    }

    /// Record types whose wildcard status is unknown, in type order.
    pub fn undetermined(&self) -> impl Iterator<Item = (RecordType, QueryOutcome)> + '_ {
        self.undetermined.iter().map(|(&rt, &outcome)| (rt, outcome))
    }

    /// True when `result` says nothing the wildcard would not have said:
    /// a success whose records are all part of the baseline for that type.
    ///
    /// A success carrying any record outside the baseline (a distinct
    /// address, say) is a specifically configured name and is not filtered.
    pub fn is_false_positive(&self, result: &ResolutionResult) -> bool {
        if !self.is_wildcard || !result.is_success() {
            return false;
        }
        match self.sample_records.get(&result.target().record_type()) {
            Some(baseline) => result.records().iter().all(|r| baseline.contains(r)),
            None => false,
        }
    }
}

use super::{QueryTarget, RData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a single query attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryOutcome {
    Success,
    /// NOERROR, but no records of the requested type
    NoAnswer,
    Nxdomain,
    Timeout,
    /// SERVFAIL, FORMERR, NOTIMP, malformed or undeliverable responses
    ServerFailure,
    Refused,
}

impl QueryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOutcome::Success => "success",
            QueryOutcome::NoAnswer => "no answer",
            QueryOutcome::Nxdomain => "nxdomain",
            QueryOutcome::Timeout => "timeout",
            QueryOutcome::ServerFailure => "server failure",
            QueryOutcome::Refused => "refused",
        }
    }

    /// The name or type definitively does not exist.
    pub fn is_absence(&self) -> bool {
        matches!(self, QueryOutcome::NoAnswer | QueryOutcome::Nxdomain)
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one query attempt.
///
/// `records` is non-empty iff `outcome` is [`QueryOutcome::Success`]; the
/// constructors are the only way to build one, so the invariant always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    target: QueryTarget,
    records: Vec<RData>,
    outcome: QueryOutcome,
}

impl ResolutionResult {
    /// Answered query. An empty record list is a `NoAnswer`, not a success.
    pub fn answered(target: QueryTarget, records: Vec<RData>) -> Self {
        let outcome = if records.is_empty() {
            QueryOutcome::NoAnswer
        } else {
            QueryOutcome::Success
        };
        Self {
            target,
            records,
            outcome,
        }
    }

    /// Any non-success outcome. Passing `Success` here yields `NoAnswer`,
    /// since a success without records cannot exist.
    pub fn failed(target: QueryTarget, outcome: QueryOutcome) -> Self {
        let outcome = match outcome {
            QueryOutcome::Success => QueryOutcome::NoAnswer,
            other => other,
        };
        Self {
            target,
            records: Vec::new(),
            outcome,
        }
    }

    pub fn target(&self) -> &QueryTarget {
        &self.target
    }

    pub fn records(&self) -> &[RData] {
        &self.records
    }

    pub fn outcome(&self) -> QueryOutcome {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome == QueryOutcome::Success
    }
}

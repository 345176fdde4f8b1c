use dns_kraken_domain::ResolutionResult;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
    /// A subdomain that resolved to something other than the wildcard answer.
    Found {
        result: ResolutionResult,
        attempts: u32,
    },
    /// Retries ran out (or were cancelled) on a transient failure, or the
    /// server refused the query.
    Unresolved {
        result: ResolutionResult,
        attempts: u32,
    },
}

impl DiscoveryEvent {
    pub fn result(&self) -> &ResolutionResult {
        match self {
            Self::Found { result, .. } | Self::Unresolved { result, .. } => result,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            Self::Found { attempts, .. } | Self::Unresolved { attempts, .. } => *attempts,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Snapshot of what a discovery run did with its candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    pub found: u64,
    pub suppressed: u64,
    pub dropped: u64,
    pub unresolved: u64,
    pub skipped: u64,
}

impl DiscoveryStats {
    /// Candidates that reached a terminal state.
    pub fn total(&self) -> u64 {
        self.found + self.suppressed + self.dropped + self.unresolved + self.skipped
    }
}

#[derive(Debug, Default)]
pub(crate) struct DiscoveryCounters {
    pub found: AtomicU64,
    pub suppressed: AtomicU64,
    pub dropped: AtomicU64,
    pub unresolved: AtomicU64,
    pub skipped: AtomicU64,
}

impl DiscoveryCounters {
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DiscoveryStats {
        DiscoveryStats {
            found: self.found.load(Ordering::Relaxed),
            suppressed: self.suppressed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

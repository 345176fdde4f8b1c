use super::RData;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// One resource record received during a zone transfer.
///
/// The type is kept as text because a zone may hold any record type, not
/// only the ones the scanner queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub owner: Arc<str>,
    pub ttl: u32,
    pub class: Arc<str>,
    pub record_type: Arc<str>,
    pub data: RData,
}

impl fmt::Display for ZoneRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.owner, self.ttl, self.class, self.record_type, self.data
        )
    }
}

/// Every record of a zone, in the order the server sent them.
pub type ZoneData = Vec<ZoneRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneTransferOutcome {
    Success(ZoneData),
    Failure(String),
}

/// Result of probing one authoritative nameserver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneTransferAttempt {
    pub nameserver: Arc<str>,
    /// `None` when the nameserver's own address could not be resolved.
    pub address: Option<IpAddr>,
    pub outcome: ZoneTransferOutcome,
}

impl ZoneTransferAttempt {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ZoneTransferOutcome::Success(_))
    }

    pub fn records(&self) -> Option<&ZoneData> {
        match &self.outcome {
            ZoneTransferOutcome::Success(records) => Some(records),
            ZoneTransferOutcome::Failure(_) => None,
        }
    }
}

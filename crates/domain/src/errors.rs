use super::QueryOutcome;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name '{name}': {reason}")]
    InvalidDomainName { name: String, reason: String },

    #[error("Invalid IP address or network: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("Invalid discovery job: {0}")]
    InvalidJob(String),

    #[error("Network too large: {hosts} hosts exceeds the limit of {limit}")]
    NetworkTooLarge { hosts: u128, limit: u64 },

    #[error("Failed to resolve NS records for {domain}: {outcome}")]
    NameserverLookupFailed {
        domain: String,
        outcome: QueryOutcome,
    },

    #[error("No nameservers configured")]
    NoNameservers,

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Zone transfer refused by {server}: {rcode}")]
    ZoneTransferRefused { server: String, rcode: String },

    #[error("Malformed zone transfer from {server}: {reason}")]
    MalformedZoneTransfer { server: String, reason: String },

    #[error("Timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error with {server}: {reason}")]
    TransportIo { server: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

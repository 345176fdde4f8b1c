use super::errors::ConfigError;
use crate::{EdnsOptions, ResolverOptions};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DNS_PORT: u16 = 53;

/// Resolver client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Nameservers to query, as `ip` or `ip:port`.
    /// Empty means the system resolvers from /etc/resolv.conf.
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// External resolver used by the `cached` check (default: "8.8.8.8:53")
    #[serde(default = "default_cached_nameserver")]
    pub cached_nameserver: String,

    /// EDNS UDP payload size advertised by the `cached` check (default: 4096)
    #[serde(default = "default_edns_payload_size")]
    pub edns_payload_size: u16,

    /// Port used for AXFR against authoritative servers (default: 53)
    #[serde(default = "default_axfr_port")]
    pub axfr_port: u16,

    /// Deadline for one complete zone transfer in milliseconds (default: 10000)
    #[serde(default = "default_axfr_timeout_ms")]
    pub axfr_timeout_ms: u64,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn axfr_timeout(&self) -> Duration {
        Duration::from_millis(self.axfr_timeout_ms)
    }

    /// Explicitly configured nameservers; empty when the system ones apply.
    pub fn nameserver_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.nameservers.iter().map(|s| parse_nameserver(s)).collect()
    }

    /// Options for the resolver pinned to `cached_nameserver`, EDNS with DO set.
    pub fn cached_options(&self) -> Result<ResolverOptions, ConfigError> {
        let server = parse_nameserver(&self.cached_nameserver)?;
        Ok(
            ResolverOptions::new(vec![server], self.timeout()).with_edns(EdnsOptions {
                max_payload: self.edns_payload_size,
                dnssec_ok: true,
            }),
        )
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            timeout_ms: default_timeout_ms(),
            cached_nameserver: default_cached_nameserver(),
            edns_payload_size: default_edns_payload_size(),
            axfr_port: default_axfr_port(),
            axfr_timeout_ms: default_axfr_timeout_ms(),
        }
    }
}

/// Parses `1.2.3.4`, `1.2.3.4:5353`, `::1` or `[::1]:5353`.
/// Port 53 is assumed when none is given.
pub fn parse_nameserver(value: &str) -> Result<SocketAddr, ConfigError> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    value
        .trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| ConfigError::InvalidNameserver(value.to_string()))
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_cached_nameserver() -> String {
    "8.8.8.8:53".to_string()
}

fn default_edns_payload_size() -> u16 {
    4096
}

fn default_axfr_port() -> u16 {
    DNS_PORT
}

fn default_axfr_timeout_ms() -> u64 {
    10_000
}

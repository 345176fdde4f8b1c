use dns_kraken_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";
const DNS_PORT: u16 = 53;

/// Extracts `nameserver` entries, in file order.
///
/// Comments (`#` or `;`) and other directives are ignored, as are addresses
/// that do not parse. A link-local IPv6 zone suffix (`fe80::1%eth0`) is
/// dropped.
pub fn parse_resolv_conf(content: &str) -> Vec<SocketAddr> {
    let mut nameservers = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let mut fields = line.split_whitespace();
        if fields.next() != Some("nameserver") {
            continue;
        }
        let Some(value) = fields.next() else {
            continue;
        };

        let address = value.split('%').next().unwrap_or(value);
        match address.parse::<IpAddr>() {
            Ok(ip) => nameservers.push(SocketAddr::new(ip, DNS_PORT)),
            Err(_) => warn!(entry = %value, "Ignoring unparseable nameserver entry"),
        }
    }

    nameservers
}

pub async fn read_nameservers(path: &Path) -> Result<Vec<SocketAddr>, DomainError> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        DomainError::IoError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let nameservers = parse_resolv_conf(&content);
    debug!(path = %path.display(), count = nameservers.len(), "Loaded system nameservers");
    Ok(nameservers)
}

pub async fn system_nameservers() -> Result<Vec<SocketAddr>, DomainError> {
    read_nameservers(Path::new(RESOLV_CONF_PATH)).await
}

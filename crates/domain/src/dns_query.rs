use super::validators::{validate_domain_name, validate_label};
use super::{DomainError, RecordType};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// A single question: fully qualified name + record type.
///
/// The name is lower-cased and always carries exactly one trailing dot, so
/// `Example.COM`, `example.com` and `example.com.` build equal targets.
/// Uses `Arc<str>` so the same target can be cloned into retries and results
/// without copying.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryTarget {
    name: Arc<str>,
    record_type: RecordType,
}

impl QueryTarget {
    pub fn new(name: &str, record_type: RecordType) -> Result<Self, DomainError> {
        let name = name.trim();
        validate_domain_name(name).map_err(|reason| DomainError::InvalidDomainName {
            name: name.to_string(),
            reason,
        })?;

        let mut fqdn = name.trim_end_matches('.').to_ascii_lowercase();
        fqdn.push('.');

        Ok(Self {
            name: Arc::from(fqdn),
            record_type,
        })
    }

    /// Builds `label.domain.`, as used for wordlist candidates and SRV service names.
    pub fn subdomain(
        label: &str,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Self, DomainError> {
        let label = label.trim().trim_end_matches('.');
        for part in label.split('.') {
            validate_label(part).map_err(|reason| DomainError::InvalidDomainName {
                name: label.to_string(),
                reason,
            })?;
        }
        let domain = domain.trim().trim_end_matches('.');
        Self::new(&format!("{label}.{domain}"), record_type)
    }

    /// Reverse-lookup target (`in-addr.arpa` / `ip6.arpa`) for an address.
    pub fn reverse(address: IpAddr) -> Self {
        let name = match address {
            IpAddr::V4(v4) => {
                let [a, b, c, d] = v4.octets();
                format!("{d}.{c}.{b}.{a}.in-addr.arpa.")
            }
            IpAddr::V6(v6) => {
                let mut name = String::with_capacity(73);
                for byte in v6.octets().iter().rev() {
                    name.push_str(&format!("{:x}.{:x}.", byte & 0x0f, byte >> 4));
                }
                name.push_str("ip6.arpa.");
                name
            }
        };

        Self {
            name: Arc::from(name),
            record_type: RecordType::PTR,
        }
    }

    /// Fully qualified name, trailing dot included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the trailing dot, for display.
    pub fn host(&self) -> &str {
        self.name.strip_suffix('.').unwrap_or(&self.name)
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Same name, different record type.
    pub fn with_record_type(&self, record_type: RecordType) -> Self {
        Self {
            name: Arc::clone(&self.name),
            record_type,
        }
    }
}

impl fmt::Display for QueryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.host(), self.record_type)
    }
}

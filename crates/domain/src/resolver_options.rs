use std::net::SocketAddr;
use std::time::Duration;

/// EDNS(0) framing added to outgoing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdnsOptions {
    pub max_payload: u16,
    pub dnssec_ok: bool,
}

impl Default for EdnsOptions {
    fn default() -> Self {
        Self {
            max_payload: 4096,
            dnssec_ok: true,
        }
    }
}

/// Where and how a resolver client sends its queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    pub nameservers: Vec<SocketAddr>,
    pub timeout: Duration,
    pub edns: Option<EdnsOptions>,
}

impl ResolverOptions {
    pub fn new(nameservers: Vec<SocketAddr>, timeout: Duration) -> Self {
        Self {
            nameservers,
            timeout,
            edns: None,
        }
    }

    pub fn with_edns(mut self, edns: EdnsOptions) -> Self {
        self.edns = Some(edns);
        self
    }
}

use serde::{Deserialize, Serialize};

/// Reverse (PTR) sweep configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PtrConfig {
    /// Concurrent PTR queries when sweeping a network (default: 20)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Largest network, in host addresses, a sweep accepts (default: 65536)
    #[serde(default = "default_max_hosts")]
    pub max_hosts: u64,
}

impl Default for PtrConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            max_hosts: default_max_hosts(),
        }
    }
}

fn default_concurrency() -> usize {
    20
}

fn default_max_hosts() -> u64 {
    65_536
}

use super::errors::ConfigError;
use crate::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Subdomain brute-force configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Resolutions in flight at once (default: 20)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Random labels queried per record type to detect wildcards (default: 3)
    #[serde(default = "default_wildcard_samples")]
    pub wildcard_samples: usize,

    /// Total attempts per candidate, first included (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause before the first retry in milliseconds (default: 250)
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Growth factor of the pause between retries (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl DiscoveryConfig {
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.base_delay_ms),
            self.backoff_multiplier,
        )
        .map_err(|e| ConfigError::Validation {
            field: "discovery",
            reason: e.to_string(),
        })
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            wildcard_samples: default_wildcard_samples(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

fn default_concurrency() -> usize {
    20
}

fn default_wildcard_samples() -> usize {
    3
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    250
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

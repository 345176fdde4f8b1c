use super::errors::ConfigError;
use super::logging::LOG_LEVELS;
use super::{DiscoveryConfig, LoggingConfig, PtrConfig, ResolverConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration, loaded from an optional TOML file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub ptr: PtrConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub nameservers: Vec<String>,
    pub timeout_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub max_attempts: Option<u32>,
    pub cached_nameserver: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Reads `config_path` when given (defaults otherwise), then applies
    /// the overrides. Does not validate; call [`Config::validate`].
    pub fn load(config_path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };
        config.apply_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if !overrides.nameservers.is_empty() {
            self.resolver.nameservers = overrides.nameservers;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.discovery.concurrency = concurrency;
            self.ptr.concurrency = concurrency;
        }
        if let Some(max_attempts) = overrides.max_attempts {
            self.discovery.max_attempts = max_attempts;
        }
        if let Some(server) = overrides.cached_nameserver {
            self.resolver.cached_nameserver = server;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "resolver.timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.resolver.axfr_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "resolver.axfr_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        self.resolver.nameserver_addrs()?;
        self.resolver.cached_options()?;

        if self.discovery.concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "discovery.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.discovery.wildcard_samples == 0 {
            return Err(ConfigError::Validation {
                field: "discovery.wildcard_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        self.discovery.retry_policy()?;

        if self.ptr.concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "ptr.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.ptr.max_hosts == 0 {
            return Err(ConfigError::Validation {
                field: "ptr.max_hosts",
                reason: "must be at least 1".to_string(),
            });
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation {
                field: "logging.level",
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }

        Ok(())
    }
}

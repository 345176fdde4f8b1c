use anyhow::Context;
use dns_kraken_domain::{CliOverrides, Config};
use tracing::info;

/// Loads and validates the configuration. Nothing is logged yet because the
/// subscriber depends on the loaded level; call [`log_config`] once it is up.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        nameservers = ?config.resolver.nameservers,
        timeout_ms = config.resolver.timeout_ms,
        concurrency = config.discovery.concurrency,
        max_attempts = config.discovery.max_attempts,
        "Configuration loaded"
    );
}

use dns_kraken_domain::Config;
use tracing::debug;

/// Logs go to stderr so stdout carries only the report.
pub fn init_logging(config: &Config) {
    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::WARN);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_max_level(log_level)
        .init();

    debug!("Logging initialized at level: {}", config.logging.level);
}

use super::enumerate::enumerate;
use super::wordlist::candidate;
use crate::di::Services;
use crate::output;
use anyhow::Context;
use dns_kraken_domain::DomainError;
use std::path::Path;
use tracing::{info, warn};

/// `enumerate` for each domain in the file. A bad line is reported and the
/// batch moves on.
pub async fn run(services: &Services, path: &Path) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    let domains: Vec<String> = content.lines().filter_map(candidate).collect();
    info!(file = %path.display(), domains = domains.len(), "Enumerating domain list");

    let lookup = services.lookup_records(services.resolver().await?)?;
    for domain in &domains {
        if services.cancel().is_cancelled() {
            warn!("Interrupted, remaining domains skipped");
            break;
        }
        match enumerate(&lookup, domain).await {
            Ok(()) => {}
            Err(e) => match e.downcast_ref::<DomainError>() {
                Some(reason) => output::invalid_domain(domain, &reason.to_string()),
                None => return Err(e),
            },
        }
    }
    Ok(())
}

use super::wordlist;
use crate::di::Services;
use crate::output;
use dns_kraken_domain::RecordType;
use futures::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub async fn run(services: &Services, domain: &str, wordlist_path: &Path) -> anyhow::Result<()> {
    let candidates = wordlist::open(wordlist_path).await?;
    let job = services.discovery_job(domain, candidates)?;

    let resolver = services.resolver().await?;
    let baseline = services
        .wildcard_detector(Arc::clone(&resolver))?
        .execute(job.domain(), &[RecordType::A])
        .await?;
    output::wildcard_filter(job.domain(), &baseline);

    let engine = services.discovery(resolver);
    let mut events = std::pin::pin!(engine.discover(job, Arc::new(baseline)));
    while let Some(event) = events.next().await {
        output::discovery_event(&event);
    }

    let stats = engine.stats();
    info!(domain = %domain, found = stats.found, total = stats.total(), "Brute force finished");
    output::discovery_summary(&stats, services.cancel().is_cancelled());
    Ok(())
}

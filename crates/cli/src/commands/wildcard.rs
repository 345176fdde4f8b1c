use crate::di::Services;
use crate::output;
use dns_kraken_domain::RecordType;

pub async fn run(services: &Services, domain: &str) -> anyhow::Result<()> {
    let detector = services.wildcard_detector(services.resolver().await?)?;
    let baseline = detector.execute(domain, &[RecordType::A]).await?;
    output::wildcard(domain, &baseline);
    Ok(())
}

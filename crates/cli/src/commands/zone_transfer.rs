use crate::di::Services;
use crate::output;
use dns_kraken_domain::DomainError;

pub async fn run(services: &Services, domain: &str) -> anyhow::Result<()> {
    let zone_transfer = services.zone_transfer(services.resolver().await?)?;

    match zone_transfer.execute(domain).await {
        Ok(attempts) => {
            for attempt in &attempts {
                output::zone_transfer_attempt(attempt);
            }
            Ok(())
        }
        Err(DomainError::NameserverLookupFailed { domain, outcome }) => {
            output::nameserver_lookup_failed(&domain, outcome);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

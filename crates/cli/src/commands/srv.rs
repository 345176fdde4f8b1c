use crate::di::Services;
use crate::output;
use dns_kraken_application::use_cases::SRV_SERVICES;

pub async fn run(services: &Services, domain: &str) -> anyhow::Result<()> {
    let lookup = services.lookup_records(services.resolver().await?)?;
    for result in lookup.execute_services(domain, &SRV_SERVICES).await? {
        output::srv(&result);
    }
    Ok(())
}

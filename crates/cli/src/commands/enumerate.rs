use crate::di::Services;
use crate::output;
use dns_kraken_application::use_cases::{LookupRecordsUseCase, ENUMERATE_TYPES};

pub async fn run(services: &Services, domain: &str) -> anyhow::Result<()> {
    let lookup = services.lookup_records(services.resolver().await?)?;
    enumerate(&lookup, domain).await
}

pub(crate) async fn enumerate(lookup: &LookupRecordsUseCase, domain: &str) -> anyhow::Result<()> {
    for result in lookup.execute(domain, &ENUMERATE_TYPES).await? {
        output::lookup("", &result);
    }
    Ok(())
}

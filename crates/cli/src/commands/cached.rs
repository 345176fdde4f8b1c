use crate::di::Services;
use crate::output;
use dns_kraken_application::use_cases::CACHED_TYPES;
use tracing::info;

/// Reports what the external resolver answers. A resolver that answers from
/// cache looks the same as one that recursed, so this is not cache detection.
pub async fn run(services: &Services, domain: &str) -> anyhow::Result<()> {
    info!(
        server = %services.config().resolver.cached_nameserver,
        domain = %domain,
        "Asking external resolver"
    );
    let lookup = services.lookup_records(services.cached_resolver()?)?;
    for result in lookup.execute(domain, &CACHED_TYPES).await? {
        output::lookup("Cached ", &result);
    }
    Ok(())
}

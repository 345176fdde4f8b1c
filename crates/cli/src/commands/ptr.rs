use crate::di::Services;
use crate::output;
use futures::StreamExt;

pub async fn run(services: &Services, target: &str) -> anyhow::Result<()> {
    let reverse = services.reverse_lookup(services.resolver().await?)?;
    let lookups = reverse.execute(target)?;
    let mut lookups = std::pin::pin!(lookups.take_until(services.cancel().cancelled()));

    let mut total = 0u64;
    let mut without_ptr = 0u64;
    let mut last_without = None;
    while let Some(lookup) = lookups.next().await {
        total += 1;
        if !output::reverse_lookup(&lookup) {
            without_ptr += 1;
            last_without = Some(lookup.address);
        }
    }

    output::reverse_summary(total, without_ptr, last_without);
    Ok(())
}

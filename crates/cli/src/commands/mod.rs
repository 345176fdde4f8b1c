pub mod bruteforce;
pub mod cached;
pub mod enumerate;
pub mod file;
pub mod ptr;
pub mod srv;
pub mod wildcard;
pub mod zone_transfer;
mod wordlist;

use crate::cli::Command;
use crate::di::Services;

pub async fn run(services: &Services, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Zonetransfer { domain } => zone_transfer::run(services, domain).await,
        Command::Enumerate { domain } => enumerate::run(services, domain).await,
        Command::Srv { domain } => srv::run(services, domain).await,
        Command::Wildcard { domain } => wildcard::run(services, domain).await,
        Command::Bruteforce {
            domain, wordlist, ..
        } => bruteforce::run(services, domain, wordlist).await,
        Command::Ptr { target, .. } => ptr::run(services, target).await,
        Command::Cached { domain, .. } => cached::run(services, domain).await,
        Command::File { path } => file::run(services, path).await,
    }
}

use clap::{Parser, Subcommand};
use dns_kraken_domain::CliOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dns-kraken")]
#[command(version)]
#[command(about = "DNS reconnaissance: zone transfers, record enumeration and subdomain brute force")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<String>,

    /// Nameserver to query (`ip` or `ip:port`), repeatable. Defaults to the system resolvers
    #[arg(short = 'n', long = "nameserver", global = true)]
    pub nameservers: Vec<String>,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Attempt AXFR against every authoritative nameserver of a domain
    Zonetransfer { domain: String },

    /// Look up A, AAAA, MX, NS, SOA, SPF and TXT records
    Enumerate { domain: String },

    /// Look up well-known SRV services
    Srv { domain: String },

    /// Check whether random subdomains resolve
    Wildcard { domain: String },

    /// Resolve every word of a wordlist as a subdomain
    Bruteforce {
        domain: String,

        /// File with one candidate label per line
        #[arg(short = 'w', long)]
        wordlist: PathBuf,

        /// Resolutions in flight at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Attempts per candidate, first included
        #[arg(long)]
        max_attempts: Option<u32>,
    },

    /// Reverse lookup of an address or a CIDR block
    Ptr {
        target: String,

        /// Lookups in flight at once
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Ask one external resolver (EDNS, DO bit set) for A, AAAA and CNAME
    Cached {
        domain: String,

        /// Resolver to ask instead of the configured one
        #[arg(long)]
        server: Option<String>,
    },

    /// Run `enumerate` for every domain listed in a file
    File { path: PathBuf },
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            nameservers: self.nameservers.clone(),
            timeout_ms: self.timeout_ms,
            log_level: self.log_level.clone(),
            ..CliOverrides::default()
        };
        match &self.command {
            Command::Bruteforce {
                concurrency,
                max_attempts,
                ..
            } => {
                overrides.concurrency = *concurrency;
                overrides.max_attempts = *max_attempts;
            }
            Command::Ptr { concurrency, .. } => overrides.concurrency = *concurrency,
            Command::Cached { server, .. } => overrides.cached_nameserver = server.clone(),
            _ => {}
        }
        overrides
    }
}

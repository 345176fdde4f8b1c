//! Report lines written to stdout.

use dns_kraken_application::use_cases::{DiscoveryEvent, DiscoveryStats, ReverseLookup};
use dns_kraken_domain::{
    QueryOutcome, ResolutionResult, WildcardBaseline, ZoneTransferAttempt, ZoneTransferOutcome,
};
use std::net::IpAddr;

pub fn zone_transfer_attempt(attempt: &ZoneTransferAttempt) {
    let address = attempt
        .address
        .map(|a| a.to_string())
        .unwrap_or_else(|| "unresolved".to_string());

    match &attempt.outcome {
        ZoneTransferOutcome::Success(records) => {
            println!("Zone transfer successful for {} ({})", attempt.nameserver, address);
            for record in records {
                println!("{record}");
            }
        }
        ZoneTransferOutcome::Failure(reason) => {
            println!(
                "Zone transfer failed for {} ({}): {}",
                attempt.nameserver, address, reason
            );
        }
    }
}

pub fn nameserver_lookup_failed(domain: &str, outcome: QueryOutcome) {
    println!("Failed to resolve NS records for {domain}: {outcome}");
}

/// One line per record, or a single line for an absent or failed type.
/// `label` prefixes the record type, e.g. "Cached ".
pub fn lookup(label: &str, result: &ResolutionResult) {
    let record_type = result.target().record_type();
    let name = result.target().host();

    match result.outcome() {
        QueryOutcome::Success => {
            for record in result.records() {
                println!("{label}{record_type} record for {name}: {record}");
            }
        }
        outcome if outcome.is_absence() => {
            println!("No {}{record_type} record found for {name}", label.to_lowercase());
        }
        outcome => {
            println!(
                "Failed to query {}{record_type} records for {name}: {outcome}",
                label.to_lowercase()
            );
        }
    }
}

pub fn srv(result: &ResolutionResult) {
    let name = result.target().host();
    match result.outcome() {
        QueryOutcome::Success => {
            for record in result.records() {
                println!("SRV record {name}: {record}");
            }
        }
        outcome if outcome.is_absence() => println!("No SRV record found for {name}"),
        outcome => println!("Failed to query SRV records for {name}: {outcome}"),
    }
}

pub fn wildcard(domain: &str, baseline: &WildcardBaseline) {
    for line in wildcard_lines(domain, baseline) {
        println!("{line}");
    }
}

fn wildcard_lines(domain: &str, baseline: &WildcardBaseline) -> Vec<String> {
    let mut lines = undetermined_lines(domain, baseline);
    for record_type in baseline.record_types() {
        for record in baseline.sample_records(record_type).into_iter().flatten() {
            lines.push(format!("Wildcard {record_type} record for {domain}: {record}"));
        }
    }
    if lines.is_empty() {
        lines.push(format!("No wildcard A record found for {domain}"));
    }
    lines
}

fn undetermined_lines(domain: &str, baseline: &WildcardBaseline) -> Vec<String> {
    baseline
        .undetermined()
        .map(|(record_type, outcome)| {
            format!("Failed to query wildcard {record_type} records for {domain}: {outcome}")
        })
        .collect()
}

pub fn wildcard_filter(domain: &str, baseline: &WildcardBaseline) {
    for line in wildcard_filter_lines(domain, baseline) {
        println!("{line}");
    }
}

fn wildcard_filter_lines(domain: &str, baseline: &WildcardBaseline) -> Vec<String> {
    let mut lines: Vec<String> = undetermined_lines(domain, baseline)
        .into_iter()
        .map(|line| format!("{line}, answers are not filtered"))
        .collect();
    if baseline.is_wildcard() {
        let answers: Vec<String> = baseline
            .record_types()
            .flat_map(|t| baseline.sample_records(t).into_iter().flatten())
            .map(|r| r.to_string())
            .collect();
        lines.push(format!(
            "Wildcard detected for {domain}, ignoring answers matching: {}",
            answers.join(", ")
        ));
    }
    lines
}

pub fn discovery_event(event: &DiscoveryEvent) {
    let result = event.result();
    let name = result.target().host();

    match event {
        DiscoveryEvent::Found { .. } => {
            for record in result.records() {
                println!("A record for {name}: {record}");
            }
        }
        DiscoveryEvent::Unresolved { attempts, .. } => {
            println!(
                "Failed to query A records for {name}: {} after {attempts} attempt(s)",
                result.outcome()
            );
        }
    }
}

pub fn discovery_summary(stats: &DiscoveryStats, interrupted: bool) {
    println!(
        "Checked {} candidates: {} found, {} wildcard matches, {} not found, {} unresolved, {} invalid",
        stats.total(),
        stats.found,
        stats.suppressed,
        stats.dropped,
        stats.unresolved,
        stats.skipped
    );
    if interrupted {
        println!("Interrupted before the wordlist was exhausted");
    }
}

/// Returns false when the address has no PTR record, so the caller can
/// summarize those instead of printing one line each.
pub fn reverse_lookup(lookup: &ReverseLookup) -> bool {
    let result = &lookup.result;
    match result.outcome() {
        QueryOutcome::Success => {
            for record in result.records() {
                println!("PTR record for {}: {}", lookup.address, record);
            }
            true
        }
        outcome if outcome.is_absence() => false,
        outcome => {
            println!("Failed to query PTR records for {}: {}", lookup.address, outcome);
            true
        }
    }
}

pub fn reverse_summary(total: u64, without_ptr: u64, last_without: Option<IpAddr>) {
    match (total, last_without) {
        (1, Some(address)) => println!("No PTR record found for {address}"),
        _ if without_ptr > 0 => {
            println!("{without_ptr} of {total} addresses have no PTR record")
        }
        _ => {}
    }
}

pub fn invalid_domain(line: &str, reason: &str) {
    println!("Skipping invalid domain {line}: {reason}");
}

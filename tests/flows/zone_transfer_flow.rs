//! NS lookup, nameserver address lookup and AXFR over TCP, end to end.

#[path = "../common/mod.rs"]
mod common;

use common::{resolver_for, TestServer, TestZone};
use dns_kraken_application::ports::{DnsResolver, ZoneTransferClient};
use dns_kraken_application::use_cases::ZoneTransferUseCase;
use dns_kraken_domain::{DomainError, ZoneTransferOutcome};
use dns_kraken_infrastructure::dns::AxfrClient;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

fn use_case(server: &TestServer) -> ZoneTransferUseCase {
    let resolver: Arc<dyn DnsResolver> = resolver_for(server);
    let client: Arc<dyn ZoneTransferClient> = Arc::new(AxfrClient::new(Duration::from_secs(2)));
    ZoneTransferUseCase::new(resolver, client).with_port(server.port())
}

#[tokio::test]
async fn test_open_zone_is_listed() {
    let zone = TestZone::new("open.test")
        .with_nameserver("ns1", Some("127.0.0.1"))
        .with_a("www", "192.0.2.10")
        .with_a("mail", "192.0.2.25")
        .allowing_transfer();
    let expected_records = zone.record_count() + 2;
    let server = TestServer::start(zone).await;

    let attempts = use_case(&server).execute("open.test").await.unwrap();

    assert_eq!(attempts.len(), 1);
    let attempt = &attempts[0];
    assert_eq!(&*attempt.nameserver, "ns1.open.test.");
    assert_eq!(attempt.address, Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    let records = attempt.records().unwrap();
    assert_eq!(records.len(), expected_records);
    assert_eq!(&*records[0].record_type, "SOA");
    assert_eq!(&*records[records.len() - 1].record_type, "SOA");
    assert!(records
        .iter()
        .any(|r| r.to_string() == "www.open.test. 300 IN A 192.0.2.10"));
}

#[tokio::test]
async fn test_refusing_and_unresolvable_nameservers_fail_individually() {
    let zone = TestZone::new("closed.test")
        .with_nameserver("ns1", Some("127.0.0.1"))
        .with_nameserver("ns2", None)
        .with_a("www", "192.0.2.10");
    let server = TestServer::start(zone).await;

    let attempts = use_case(&server).execute("closed.test").await.unwrap();

    assert_eq!(attempts.len(), 2);
    let ns1 = attempts.iter().find(|a| &*a.nameserver == "ns1.closed.test.").unwrap();
    let ns2 = attempts.iter().find(|a| &*a.nameserver == "ns2.closed.test.").unwrap();

    assert!(matches!(ns1.outcome, ZoneTransferOutcome::Failure(_)));
    assert!(ns1.address.is_some());
    assert!(matches!(ns2.outcome, ZoneTransferOutcome::Failure(_)));
    assert_eq!(ns2.address, None);
}

#[tokio::test]
async fn test_domain_without_ns_is_a_lookup_failure() {
    let server = TestServer::start(TestZone::new("served.test")).await;

    let err = use_case(&server).execute("elsewhere.test").await.unwrap_err();

    assert!(matches!(err, DomainError::NameserverLookupFailed { .. }));
}

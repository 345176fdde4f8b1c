#![allow(dead_code)]

use async_trait::async_trait;
use dns_kraken_application::ports::ZoneTransferClient;
use dns_kraken_domain::{DomainError, QueryTarget, RData, ZoneData, ZoneRecord};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub fn soa_record(zone: &str) -> ZoneRecord {
    ZoneRecord {
        owner: Arc::from(zone),
        ttl: 3600,
        class: Arc::from("IN"),
        record_type: Arc::from("SOA"),
        data: RData::from("ns1.example.com. hostmaster.example.com. 1 7200 3600 1209600 300"),
    }
}

pub fn a_record(owner: &str, address: &str) -> ZoneRecord {
    ZoneRecord {
        owner: Arc::from(owner),
        ttl: 300,
        class: Arc::from("IN"),
        record_type: Arc::from("A"),
        data: RData::from(address),
    }
}

/// Transfer client answering per server address. Unknown servers refuse.
#[derive(Clone, Default)]
pub struct MockZoneTransferClient {
    zones: Arc<Mutex<HashMap<SocketAddr, ZoneData>>>,
    requests: Arc<Mutex<Vec<(String, SocketAddr)>>>,
}

impl MockZoneTransferClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, server: SocketAddr, records: ZoneData) -> Self {
        self.zones.lock().unwrap().insert(server, records);
        self
    }

    pub fn requests(&self) -> Vec<(String, SocketAddr)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ZoneTransferClient for MockZoneTransferClient {
    async fn transfer(
        &self,
        zone: &QueryTarget,
        server: SocketAddr,
    ) -> Result<ZoneData, DomainError> {
        self.requests
            .lock()
            .unwrap()
            .push((zone.name().to_string(), server));

        self.zones
            .lock()
            .unwrap()
            .get(&server)
            .cloned()
            .ok_or_else(|| DomainError::ZoneTransferRefused {
                server: server.to_string(),
                rcode: "REFUSED".to_string(),
            })
    }
}

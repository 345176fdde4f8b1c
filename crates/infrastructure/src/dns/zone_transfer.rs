use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::tcp::TcpConnection;
use async_trait::async_trait;
use dns_kraken_application::ports::ZoneTransferClient;
use dns_kraken_domain::{DomainError, QueryTarget, ZoneData};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType as HickoryRecordType;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

/// AXFR over TCP.
///
/// The whole transfer, connect included, runs under one deadline. The
/// stream must open and close with the zone's SOA record.
pub struct AxfrClient {
    timeout: Duration,
    max_records: usize,
}

impl AxfrClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    async fn run(&self, zone: &QueryTarget, server: SocketAddr) -> Result<ZoneData, DomainError> {
        let malformed = |reason: String| DomainError::MalformedZoneTransfer {
            server: server.to_string(),
            reason,
        };

        let (id, query) = MessageBuilder::build_axfr(zone)?;
        let mut connection = TcpConnection::connect(server).await?;
        connection.write_message(&query).await?;

        let mut records = ZoneData::new();
        let mut messages = 0usize;

        loop {
            let Some(bytes) = connection.read_message().await? else {
                return Err(malformed(if records.is_empty() {
                    "connection closed without a response".to_string()
                } else {
                    "stream ended before the closing SOA".to_string()
                }));
            };
            messages += 1;

            let message = ResponseParser::parse(&bytes)?;
            if message.id() != id {
                return Err(malformed(format!(
                    "response ID {} does not match query ID {}",
                    message.id(),
                    id
                )));
            }
            if message.response_code() != ResponseCode::NoError {
                return Err(DomainError::ZoneTransferRefused {
                    server: server.to_string(),
                    rcode: message.response_code().to_string(),
                });
            }
            if message.answers().is_empty() && records.is_empty() {
                return Err(malformed("empty answer".to_string()));
            }

            for record in message.answers() {
                let is_soa = record.record_type() == HickoryRecordType::SOA;

                if records.is_empty() && !is_soa {
                    return Err(malformed(format!(
                        "first record is {} instead of SOA",
                        record.record_type()
                    )));
                }

                let closing = is_soa && !records.is_empty();
                records.push(ResponseParser::zone_record(record));

                if closing {
                    debug!(
                        zone = %zone.host(),
                        server = %server,
                        records = records.len(),
                        messages = messages,
                        "Zone transfer complete"
                    );
                    return Ok(records);
                }
                if records.len() >= self.max_records {
                    return Err(malformed(format!(
                        "more than {} records",
                        self.max_records
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl ZoneTransferClient for AxfrClient {
    async fn transfer(
        &self,
        zone: &QueryTarget,
        server: SocketAddr,
    ) -> Result<ZoneData, DomainError> {
        tokio::time::timeout(self.timeout, self.run(zone, server))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: server.to_string(),
            })?
    }
}

//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dns_kraken_domain::{DomainError, EdnsOptions, QueryTarget};
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query and serialize it to wire format.
    ///
    /// Creates a standard query with:
    /// - Random ID for request/response matching
    /// - RD (Recursion Desired) flag set
    /// - Single question section
    /// - An OPT record when `edns` is given
    ///
    /// Returns the message ID together with the bytes.
    pub fn build_query(
        target: &QueryTarget,
        edns: Option<&EdnsOptions>,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let hickory_type = RecordTypeMapper::to_hickory(target.record_type());
        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(Self::question(target.name(), hickory_type)?);

        if let Some(options) = edns {
            let mut opt = Edns::new();
            opt.set_max_payload(options.max_payload);
            opt.flags_mut().dnssec_ok = options.dnssec_ok;
            message.set_edns(opt);
        }

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Build an AXFR request for `zone`. Zone transfers are never recursive.
    pub fn build_axfr(zone: &QueryTarget) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(false);
        message.add_query(Self::question(zone.name(), HickoryRecordType::AXFR)?);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    fn question(name: &str, query_type: HickoryRecordType) -> Result<Query, DomainError> {
        let name = Name::from_str(name).map_err(|e| DomainError::InvalidDomainName {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(query_type);
        query.set_query_class(DNSClass::IN);
        Ok(query)
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

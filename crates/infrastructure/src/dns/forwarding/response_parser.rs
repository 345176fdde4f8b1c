use super::record_type_map::RecordTypeMapper;
use dns_kraken_domain::{
    DomainError, QueryOutcome, QueryTarget, RData, ResolutionResult, ZoneRecord,
};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use std::sync::Arc;
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })
    }

    /// Turns a response into the result for `target`.
    ///
    /// Only answers of the requested type count; a CNAME chain ending in no
    /// record of that type is `NoAnswer`.
    pub fn classify(target: &QueryTarget, message: &Message) -> ResolutionResult {
        let rcode = message.response_code();

        let outcome = Self::rcode_to_outcome(rcode);
        if outcome != QueryOutcome::Success {
            debug!(target = %target, rcode = %rcode, "DNS response carried an error code");
            return ResolutionResult::failed(target.clone(), outcome);
        }

        let records: Vec<RData> = message
            .answers()
            .iter()
            .filter(|r| RecordTypeMapper::matches(r.record_type(), target.record_type()))
            .map(|r| RData::new(r.data().to_string()))
            .collect();

        debug!(
            target = %target,
            answers = message.answers().len(),
            matching = records.len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        ResolutionResult::answered(target.clone(), records)
    }

    /// `NoError` maps to `Success`; an empty answer is decided by
    /// [`ResolutionResult::answered`].
    pub fn rcode_to_outcome(rcode: ResponseCode) -> QueryOutcome {
        match rcode {
            ResponseCode::NoError => QueryOutcome::Success,
            ResponseCode::NXDomain => QueryOutcome::Nxdomain,
            ResponseCode::Refused => QueryOutcome::Refused,
            _ => QueryOutcome::ServerFailure,
        }
    }

    pub fn zone_record(record: &Record) -> ZoneRecord {
        ZoneRecord {
            owner: Arc::from(record.name().to_string()),
            ttl: record.ttl(),
            class: Arc::from(record.dns_class().to_string()),
            record_type: Arc::from(record.record_type().to_string()),
            data: RData::new(record.data().to_string()),
        }
    }
}

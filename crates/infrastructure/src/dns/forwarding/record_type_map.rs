use dns_kraken_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    ///
    /// Goes through the wire number so SPF (99), which hickory only knows as
    /// `Unknown(99)`, maps the same way as the common types.
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Whether a record in an answer section is of the requested type.
    pub fn matches(hickory_type: HickoryRecordType, record_type: RecordType) -> bool {
        u16::from(hickory_type) == record_type.to_u16()
    }
}

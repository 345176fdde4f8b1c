use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, NS, SOA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A small authoritative zone the test server answers from.
#[derive(Debug, Clone)]
pub struct TestZone {
    origin: String,
    addresses: HashMap<String, Vec<Ipv4Addr>>,
    nameservers: Vec<String>,
    wildcard: Option<Ipv4Addr>,
    allow_transfer: bool,
}

impl TestZone {
    pub fn new(origin: &str) -> Self {
        Self {
            origin: fqdn(origin),
            addresses: HashMap::new(),
            nameservers: Vec::new(),
            wildcard: None,
            allow_transfer: false,
        }
    }

    /// `example.test` with `*`, `www`, `mail` and a nameserver on loopback.
    pub fn example_test() -> Self {
        Self::new("example.test")
            .with_wildcard("192.0.2.1")
            .with_a("www", "192.0.2.10")
            .with_a("mail", "192.0.2.25")
            .with_nameserver("ns1", Some("127.0.0.1"))
    }

    pub fn with_a(mut self, label: &str, address: &str) -> Self {
        let name = format!("{label}.{}", self.origin);
        self.addresses
            .entry(name)
            .or_default()
            .push(address.parse().unwrap());
        self
    }

    pub fn with_wildcard(mut self, address: &str) -> Self {
        self.wildcard = Some(address.parse().unwrap());
        self
    }

    /// NS record for `label.origin`, with a glue A record when `address` is given.
    pub fn with_nameserver(mut self, label: &str, address: Option<&str>) -> Self {
        self.nameservers.push(format!("{label}.{}", self.origin));
        match address {
            Some(address) => self.with_a(label, address),
            None => self,
        }
    }

    pub fn allowing_transfer(mut self) -> Self {
        self.allow_transfer = true;
        self
    }

    pub fn allow_transfer(&self) -> bool {
        self.allow_transfer
    }

    /// Explicitly configured A records, ignoring the wildcard.
    pub fn record_count(&self) -> usize {
        self.addresses.values().map(Vec::len).sum()
    }

    pub fn answer(&self, query: &Message) -> Message {
        let question = &query.queries()[0];
        let qname = question.name().to_string().to_ascii_lowercase();
        let in_zone = qname == self.origin || qname.ends_with(&format!(".{}", self.origin));

        if !in_zone {
            return reply(query, ResponseCode::Refused, Vec::new());
        }

        match question.query_type() {
            RecordType::A => match self.addresses.get(&qname) {
                Some(addresses) => reply(query, ResponseCode::NoError, a_records(&qname, addresses)),
                None => match self.wildcard {
                    Some(address) if qname != self.origin => {
                        reply(query, ResponseCode::NoError, a_records(&qname, &[address]))
                    }
                    _ if self.nameservers.contains(&qname) || qname == self.origin => {
                        reply(query, ResponseCode::NoError, Vec::new())
                    }
                    _ => reply(query, ResponseCode::NXDomain, Vec::new()),
                },
            },
            RecordType::NS if qname == self.origin => {
                let answers = self
                    .nameservers
                    .iter()
                    .map(|ns| Record::from_rdata(name(&self.origin), 3600, RData::NS(NS(name(ns)))))
                    .collect();
                reply(query, ResponseCode::NoError, answers)
            }
            _ if self.addresses.contains_key(&qname) || qname == self.origin => {
                reply(query, ResponseCode::NoError, Vec::new())
            }
            _ => reply(query, ResponseCode::NXDomain, Vec::new()),
        }
    }

    /// AXFR answer split over two messages, bracketed by the SOA.
    pub fn transfer(&self, query: &Message) -> Vec<Message> {
        if !self.allow_transfer {
            return vec![reply(query, ResponseCode::Refused, Vec::new())];
        }

        let mut names: Vec<&String> = self.addresses.keys().collect();
        names.sort();
        let records: Vec<Record> = names
            .into_iter()
            .flat_map(|n| a_records(n, &self.addresses[n]))
            .collect();
        let (first, second) = records.split_at(records.len() / 2);

        let mut opening = vec![self.soa()];
        opening.extend_from_slice(first);
        let mut closing = second.to_vec();
        closing.push(self.soa());

        vec![
            reply(query, ResponseCode::NoError, opening),
            reply(query, ResponseCode::NoError, closing),
        ]
    }

    fn soa(&self) -> Record {
        let soa = SOA::new(
            name(&format!("ns1.{}", self.origin)),
            name(&format!("hostmaster.{}", self.origin)),
            2024010101,
            7200,
            3600,
            1209600,
            300,
        );
        Record::from_rdata(name(&self.origin), 3600, RData::SOA(soa))
    }
}

pub fn reply(query: &Message, rcode: ResponseCode, answers: Vec<Record>) -> Message {
    let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(query.recursion_desired());
    response.set_authoritative(true);
    response.set_response_code(rcode);
    for q in query.queries() {
        response.add_query(q.clone());
    }
    for answer in answers {
        response.add_answer(answer);
    }
    response
}

fn a_records(owner: &str, addresses: &[Ipv4Addr]) -> Vec<Record> {
    addresses
        .iter()
        .map(|ip| Record::from_rdata(name(owner), 300, RData::A(A(*ip))))
        .collect()
}

fn name(value: &str) -> Name {
    Name::from_str(value).unwrap()
}

fn fqdn(value: &str) -> String {
    format!("{}.", value.trim_end_matches('.').to_ascii_lowercase())
}

#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::{A, CNAME, MX, SOA};
use hickory_proto::rr::{Name, RData, Record};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinHandle;

type UdpHandler = Arc<dyn Fn(&Message) -> Option<Message> + Send + Sync>;
type TcpHandler = Arc<dyn Fn(&Message) -> Vec<Message> + Send + Sync>;

/// In-process DNS server on 127.0.0.1 with scripted answers.
///
/// A UDP handler returning `None` never answers. A TCP handler returning no
/// messages keeps the connection open without answering; otherwise the
/// messages are written in order and the connection is closed.
pub struct MockDnsServer {
    addr: SocketAddr,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn udp<F>(handler: F) -> Self
    where
        F: Fn(&Message) -> Option<Message> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        Self {
            addr,
            tasks: vec![spawn_udp(socket, Arc::new(handler))],
        }
    }

    pub async fn tcp<F>(handler: F) -> Self
    where
        F: Fn(&Message) -> Vec<Message> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        Self {
            addr,
            tasks: vec![spawn_tcp(listener, Arc::new(handler))],
        }
    }

    /// UDP and TCP on the same port.
    pub async fn udp_and_tcp<U, T>(udp: U, tcp: T) -> Self
    where
        U: Fn(&Message) -> Option<Message> + Send + Sync + 'static,
        T: Fn(&Message) -> Vec<Message> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let listener = TcpListener::bind(addr).await.unwrap();
        Self {
            addr,
            tasks: vec![
                spawn_udp(socket, Arc::new(udp)),
                spawn_tcp(listener, Arc::new(tcp)),
            ],
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_udp(socket: UdpSocket, handler: UdpHandler) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            let Ok(query) = Message::from_vec(&buf[..len]) else {
                continue;
            };
            if let Some(response) = handler(&query) {
                let bytes = response.to_vec().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
        }
    })
}

fn spawn_tcp(listener: TcpListener, handler: TcpHandler) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(serve_tcp(stream, Arc::clone(&handler)));
        }
    })
}

async fn serve_tcp(mut stream: TcpStream, handler: TcpHandler) {
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return;
    }
    let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
    if stream.read_exact(&mut buf).await.is_err() {
        return;
    }
    let Ok(query) = Message::from_vec(&buf) else {
        return;
    };

    let responses = handler(&query);
    if responses.is_empty() {
        tokio::time::sleep(Duration::from_secs(60)).await;
        return;
    }
    for response in responses {
        let bytes = response.to_vec().unwrap();
        let mut frame = (bytes.len() as u16).to_be_bytes().to_vec();
        frame.extend_from_slice(&bytes);
        if stream.write_all(&frame).await.is_err() {
            return;
        }
    }
}

// ============================================================================
// Response builders
// ============================================================================

pub fn reply(query: &Message, rcode: ResponseCode, answers: Vec<Record>) -> Message {
    let mut response = Message::new(query.id(), MessageType::Response, OpCode::Query);
    response.set_recursion_desired(query.recursion_desired());
    response.set_recursion_available(true);
    response.set_response_code(rcode);
    for q in query.queries() {
        response.add_query(q.clone());
    }
    for answer in answers {
        response.add_answer(answer);
    }
    response
}

pub fn question_name(query: &Message) -> String {
    query.queries()[0].name().to_string()
}

fn name(value: &str) -> Name {
    Name::from_str(value).unwrap()
}

pub fn a_record(owner: &str, address: &str) -> Record {
    let ip: Ipv4Addr = address.parse().unwrap();
    Record::from_rdata(name(owner), 300, RData::A(A(ip)))
}

pub fn cname_record(owner: &str, target: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::CNAME(CNAME(name(target))))
}

pub fn mx_record(owner: &str, preference: u16, exchange: &str) -> Record {
    Record::from_rdata(name(owner), 300, RData::MX(MX::new(preference, name(exchange))))
}

pub fn soa_record(zone: &str) -> Record {
    let soa = SOA::new(
        name(&format!("ns1.{zone}")),
        name(&format!("hostmaster.{zone}")),
        2024010101,
        7200,
        3600,
        1209600,
        300,
    );
    Record::from_rdata(name(zone), 3600, RData::SOA(soa))
}

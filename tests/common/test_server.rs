use super::fixtures::TestZone;
use hickory_proto::op::Message;
use hickory_proto::rr::RecordType;
use hickory_proto::serialize::binary::BinEncodable;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinHandle;

/// Authoritative server for one [`TestZone`] on 127.0.0.1, UDP and TCP on
/// the same port. AXFR is served over TCP.
pub struct TestServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start(zone: TestZone) -> Self {
        let zone = Arc::new(zone);
        let queries = Arc::new(AtomicUsize::new(0));

        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let listener = TcpListener::bind(addr).await.unwrap();

        let tasks = vec![
            tokio::spawn(serve_udp(socket, Arc::clone(&zone), Arc::clone(&queries))),
            tokio::spawn(serve_tcp(listener, zone)),
        ];

        Self {
            addr,
            queries,
            tasks,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// UDP queries answered so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn serve_udp(socket: UdpSocket, zone: Arc<TestZone>, queries: Arc<AtomicUsize>) {
    let mut buf = vec![0u8; 4096];
    loop {
        let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
            return;
        };
        let Ok(query) = Message::from_vec(&buf[..len]) else {
            continue;
        };
        queries.fetch_add(1, Ordering::SeqCst);
        let bytes = zone.answer(&query).to_vec().unwrap();
        let _ = socket.send_to(&bytes, peer).await;
    }
}

async fn serve_tcp(listener: TcpListener, zone: Arc<TestZone>) {
    loop {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        tokio::spawn(serve_connection(stream, Arc::clone(&zone)));
    }
}

async fn serve_connection(mut stream: TcpStream, zone: Arc<TestZone>) {
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

    let responses = if query.queries()[0].query_type() == RecordType::AXFR {
        zone.transfer(&query)
    } else {
        vec![zone.answer(&query)]
    };

    for response in responses {
        let bytes = response.to_vec().unwrap();
        let mut frame = (bytes.len() as u16).to_be_bytes().to_vec();
        frame.extend_from_slice(&bytes);
        if stream.write_all(&frame).await.is_err() {
            return;
        }
    }
}

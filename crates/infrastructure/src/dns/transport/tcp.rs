use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dns_kraken_domain::DomainError;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP with the 2-byte length prefix of RFC 1035 §4.2.2.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut connection = TcpConnection::connect(self.server_addr).await?;
        connection.write_message(message_bytes).await?;
        connection
            .read_message()
            .await?
            .ok_or_else(|| DomainError::TransportIo {
                server: self.server_addr.to_string(),
                reason: "connection closed before a response".to_string(),
            })
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse { bytes })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

/// A length-framed DNS stream, kept open for multi-message exchanges such as
/// zone transfers.
pub struct TcpConnection {
    stream: TcpStream,
    server_addr: SocketAddr,
}

impl TcpConnection {
    pub async fn connect(server_addr: SocketAddr) -> Result<Self, DomainError> {
        let stream = TcpStream::connect(server_addr)
            .await
            .map_err(|e| DomainError::TransportIo {
                server: server_addr.to_string(),
                reason: format!("TCP connect failed: {e}"),
            })?;
        debug!(server = %server_addr, "TCP connection established");
        Ok(Self {
            stream,
            server_addr,
        })
    }

    pub async fn write_message(&mut self, message_bytes: &[u8]) -> Result<(), DomainError> {
        let len = u16::try_from(message_bytes.len()).map_err(|_| DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: format!("message of {} bytes exceeds TCP framing", message_bytes.len()),
        })?;

        let mut frame = Vec::with_capacity(message_bytes.len() + 2);
        frame.extend_from_slice(&len.to_be_bytes());
        frame.extend_from_slice(message_bytes);

        self.stream
            .write_all(&frame)
            .await
            .map_err(|e| self.io_error("write", e))
    }

    /// Next framed message, or `None` when the peer closed the stream
    /// between messages.
    pub async fn read_message(&mut self) -> Result<Option<Vec<u8>>, DomainError> {
        let mut len_buf = [0u8; 2];
        match self.stream.read_exact(&mut len_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(self.io_error("read", e)),
        }

        let len = usize::from(u16::from_be_bytes(len_buf));
        let mut message = vec![0u8; len];
        self.stream
            .read_exact(&mut message)
            .await
            .map_err(|e| self.io_error("read", e))?;

        Ok(Some(message))
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: format!("TCP {action} failed: {e}"),
        }
    }
}

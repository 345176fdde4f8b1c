use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{tcp::TcpTransport, udp::UdpTransport, Transport};
use crate::system::resolv_conf;
use async_trait::async_trait;
use dns_kraken_application::ports::DnsResolver;
use dns_kraken_domain::{
    DomainError, EdnsOptions, QueryOutcome, QueryTarget, ResolutionResult, ResolverOptions,
};
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Stub resolver client speaking plain DNS to a fixed list of nameservers.
///
/// Each call asks one nameserver, rotating round-robin between calls, so a
/// caller's retry lands on the next server. A truncated UDP answer is asked
/// again over TCP to the same server.
pub struct UpstreamResolver {
    nameservers: Arc<[SocketAddr]>,
    timeout: Duration,
    edns: Option<EdnsOptions>,
    next: AtomicUsize,
}

impl UpstreamResolver {
    pub fn new(options: ResolverOptions) -> Result<Self, DomainError> {
        if options.nameservers.is_empty() {
            return Err(DomainError::NoNameservers);
        }
        Ok(Self {
            nameservers: Arc::from(options.nameservers),
            timeout: options.timeout,
            edns: options.edns,
            next: AtomicUsize::new(0),
        })
    }

    /// Uses the nameservers of the host's resolver configuration.
    pub async fn system(timeout: Duration) -> Result<Self, DomainError> {
        let nameservers = resolv_conf::system_nameservers().await?;
        Self::new(ResolverOptions::new(nameservers, timeout))
    }

    pub fn nameservers(&self) -> &[SocketAddr] {
        &self.nameservers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn resolve_with(
        &self,
        target: &QueryTarget,
        nameservers: &[SocketAddr],
        timeout: Duration,
    ) -> ResolutionResult {
        if nameservers.is_empty() {
            return ResolutionResult::failed(target.clone(), QueryOutcome::ServerFailure);
        }
        let server = nameservers[self.next.fetch_add(1, Ordering::Relaxed) % nameservers.len()];

        match self.exchange(target, server, timeout).await {
            Ok(message) => ResponseParser::classify(target, &message),
            Err(e) => {
                let outcome = match e {
                    DomainError::TransportTimeout { .. } => QueryOutcome::Timeout,
                    _ => QueryOutcome::ServerFailure,
                };
                debug!(target = %target, server = %server, error = %e, outcome = %outcome, "Query failed");
                ResolutionResult::failed(target.clone(), outcome)
            }
        }
    }

    async fn exchange(
        &self,
        target: &QueryTarget,
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let (id, query) = MessageBuilder::build_query(target, self.edns.as_ref())?;

        let message = Self::send(&Transport::Udp(UdpTransport::new(server)), id, &query, timeout).await?;
        if !message.truncated() {
            return Ok(message);
        }

        debug!(target = %target, server = %server, "Truncated UDP answer, asking again over TCP");
        Self::send(&Transport::Tcp(TcpTransport::new(server)), id, &query, timeout).await
    }

    async fn send(
        transport: &Transport,
        id: u16,
        query: &[u8],
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let response = transport.send(query, timeout).await?;
        let message = ResponseParser::parse(&response.bytes)?;

        if message.id() != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "{} response ID {} does not match query ID {}",
                transport.protocol_name(),
                message.id(),
                id
            )));
        }
        Ok(message)
    }
}

#[async_trait]
impl DnsResolver for UpstreamResolver {
    async fn resolve(&self, target: &QueryTarget) -> ResolutionResult {
        self.resolve_with(target, &self.nameservers, self.timeout).await
    }
}

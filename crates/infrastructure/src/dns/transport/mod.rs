pub mod udp;
pub mod udp_pool;

use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;
pub use udp_pool::{PoolStats, UdpSocketPool};

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub rtt: Duration,
}

/// One query/response exchange with a single server.
///
/// Implementations must bound the exchange by `timeout` and only hand back
/// a datagram that came from `server` and echoes the query ID.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

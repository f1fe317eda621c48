//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Responses up to 4096 bytes are
//! accepted (EDNS(0)); truncated responses are not retried over TCP.

use super::{DnsTransport, TransportResponse, UdpSocketPool};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one pooled socket per exchange.
pub struct UdpTransport {
    pool: Arc<UdpSocketPool>,
}

impl UdpTransport {
    pub fn new(pool: Arc<UdpSocketPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let started = Instant::now();
        let deadline = started + timeout;

        let pooled = self
            .pool
            .acquire(server)
            .await
            .map_err(|e| transport_error(server, "acquire socket", e))?;
        let socket = pooled.socket();

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send_to(message_bytes, server))
            .await
            .map_err(|_| DomainError::QueryTimeout {
                server: server.to_string(),
            })?
            .map_err(|e| transport_error(server, "send", e))?;

        debug!(server = %server, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| DomainError::QueryTimeout {
                        server: server.to_string(),
                    })?
                    .map_err(|e| transport_error(server, "receive", e))?;

            if from_addr != server {
                warn!(
                    expected = %server,
                    received_from = %from_addr,
                    "Dropping UDP datagram from unexpected source"
                );
                continue;
            }

            let datagram = &recv_buf[..bytes_received];
            if let Err(e) = validate_response_id(message_bytes, datagram, server) {
                debug!(server = %server, error = %e, "Dropping stale UDP datagram");
                continue;
            }

            let rtt = started.elapsed();
            debug!(
                server = %server,
                bytes_received,
                rtt_ms = rtt.as_millis() as u64,
                "UDP response received"
            );

            return Ok(TransportResponse {
                bytes: datagram.to_vec(),
                rtt,
            });
        }
    }
}

/// The first two bytes of a response must echo the query ID.
pub(crate) fn validate_response_id(
    query: &[u8],
    response: &[u8],
    server: SocketAddr,
) -> Result<(), DomainError> {
    if query.len() < 2 || response.len() < 2 {
        return Err(DomainError::Decode(format!(
            "message from {} too short to carry an ID",
            server
        )));
    }
    let expected = u16::from_be_bytes([query[0], query[1]]);
    let actual = u16::from_be_bytes([response[0], response[1]]);
    if expected != actual {
        return Err(DomainError::Decode(format!(
            "ID mismatch from {}: expected {:#06x}, got {:#06x}",
            server, expected, actual
        )));
    }
    Ok(())
}

fn transport_error(server: SocketAddr, action: &str, e: std::io::Error) -> DomainError {
    DomainError::Transport {
        server: server.to_string(),
        reason: format!("{} failed: {}", action, e),
    }
}

#[cfg(test)]
#[path = "udp_test.rs"]
mod tests;

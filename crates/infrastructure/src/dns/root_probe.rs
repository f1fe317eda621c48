use super::root_hints::RootHints;
use super::transport::DnsTransport;
use super::wire;
use futures::future::join_all;
use rootwalk_domain::{DomainError, RecordClass, RecordType, RootServer, SelectedRoot};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Zone asked for during the probe; any root answers it with a referral.
const PROBE_ZONE: &str = "com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub server: RootServer,
    /// `None` when the root timed out or answered with garbage.
    pub latency: Option<Duration>,
}

/// Measures the round trip to every root and picks the fastest.
pub struct RootProbe {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
    port: u16,
}

impl RootProbe {
    pub fn new(transport: Arc<dyn DnsTransport>, timeout: Duration, port: u16) -> Self {
        Self {
            transport,
            timeout,
            port,
        }
    }

    /// Probes all roots concurrently; results keep the hints order.
    pub async fn measure(&self, hints: &RootHints) -> Vec<ProbeResult> {
        let probes = hints.servers().iter().map(|server| async move {
            let latency = match self.probe_one(server).await {
                Ok(latency) => {
                    info!(
                        root = %server,
                        latency_ms = latency.as_secs_f64() * 1000.0,
                        "Root probe answered"
                    );
                    Some(latency)
                }
                Err(e) => {
                    warn!(root = %server, error = %e, "Root probe failed, skipping");
                    None
                }
            };
            ProbeResult {
                server: server.clone(),
                latency,
            }
        });

        join_all(probes).await
    }

    pub async fn select_nearest(&self, hints: &RootHints) -> Option<SelectedRoot> {
        let selected = pick_nearest(&self.measure(hints).await);
        match &selected {
            Some(root) => info!(
                root = %root.server,
                latency_ms = root.latency.as_millis() as u64,
                "Nearest root selected"
            ),
            None => warn!("No root server answered the latency probe"),
        }
        selected
    }

    async fn probe_one(&self, server: &RootServer) -> Result<Duration, DomainError> {
        let query = wire::encode_query(PROBE_ZONE, RecordType::NS, RecordClass::IN, false)?;
        let addr = SocketAddr::from((server.address, self.port));
        let response = self.transport.send(addr, &query, self.timeout).await?;
        wire::validate_response(&query, &response.bytes)?;
        Ok(response.rtt)
    }
}

/// Lowest latency wins; the first in hints order breaks ties.
pub fn pick_nearest(results: &[ProbeResult]) -> Option<SelectedRoot> {
    results
        .iter()
        .filter_map(|r| r.latency.map(|latency| (r, latency)))
        .min_by_key(|(_, latency)| *latency)
        .map(|(r, latency)| SelectedRoot {
            server: r.server.clone(),
            latency,
        })
}

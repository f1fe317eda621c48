use super::message::question_of;
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use rootwalk_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScriptedQuery {
    pub server: Ipv4Addr,
    pub name: String,
    pub qtype: u16,
    pub bytes: Vec<u8>,
}

pub enum Reply {
    Timeout,
    Message(Vec<u8>),
}

type Handler = Arc<dyn Fn(&ScriptedQuery) -> Reply + Send + Sync>;

/// In-memory network: each server address answers through a closure.
/// Unscripted servers time out.
#[derive(Default)]
pub struct ScriptedTransport {
    handlers: Mutex<HashMap<Ipv4Addr, Handler>>,
    log: Mutex<Vec<ScriptedQuery>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&self, server: &str, handler: F)
    where
        F: Fn(&ScriptedQuery) -> Reply + Send + Sync + 'static,
    {
        self.handlers
            .lock()
            .unwrap()
            .insert(server.parse().unwrap(), Arc::new(handler));
    }

    /// Makes a scripted server time out from now on.
    pub fn silence(&self, server: &str) {
        let server: Ipv4Addr = server.parse().unwrap();
        self.handlers.lock().unwrap().remove(&server);
    }

    pub fn queries(&self) -> Vec<ScriptedQuery> {
        self.log.lock().unwrap().clone()
    }

    pub fn queries_to(&self, server: &str) -> usize {
        let server: Ipv4Addr = server.parse().unwrap();
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.server == server)
            .count()
    }

    pub fn total_queries(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(
        &self,
        server: SocketAddr,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let IpAddr::V4(ip) = server.ip() else {
            panic!("scripted transport only speaks IPv4");
        };
        let (name, qtype) = question_of(message_bytes);
        let query = ScriptedQuery {
            server: ip,
            name,
            qtype,
            bytes: message_bytes.to_vec(),
        };
        self.log.lock().unwrap().push(query.clone());

        let handler = self.handlers.lock().unwrap().get(&ip).cloned();
        match handler.map(|h| h(&query)) {
            Some(Reply::Message(bytes)) => Ok(TransportResponse {
                bytes,
                rtt: Duration::from_millis(1),
            }),
            Some(Reply::Timeout) | None => Err(DomainError::QueryTimeout {
                server: server.to_string(),
            }),
        }
    }
}

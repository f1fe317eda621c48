use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

/// A root server taken from the hints file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RootServer {
    pub name: Arc<str>,
    pub address: Ipv4Addr,
}

impl RootServer {
    pub fn new(name: impl Into<Arc<str>>, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

impl fmt::Display for RootServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// The root picked as entry point, with the round trip that won it the spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRoot {
    pub server: RootServer,
    pub latency: Duration,
}

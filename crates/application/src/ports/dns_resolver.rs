use async_trait::async_trait;
use rootwalk_domain::{AddressRecord, DnsQuery, DomainError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResolution {
    pub records: Arc<Vec<AddressRecord>>,
    pub cache_hit: bool,
}

impl DnsResolution {
    pub fn new(records: Vec<AddressRecord>, cache_hit: bool) -> Self {
        Self {
            records: Arc::new(records),
            cache_hit,
        }
    }
}

/// Walks the delegation chain for a query. Implementations hold no state
/// across calls other than their entry point and transport.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError>;
}

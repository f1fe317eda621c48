use async_trait::async_trait;
use rootwalk_domain::{AddressRecord, DnsQuery, DomainError};

/// Raw view of one stored entry, records not filtered for expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntrySnapshot {
    pub key: String,
    pub value: serde_json::Value,
}

/// Port for the TTL-governed response cache.
#[async_trait]
pub trait RecordCache: Send + Sync {
    /// Live records for the query, remaining TTLs, deduplicated by address.
    async fn get(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError>;

    /// Replaces whatever was stored for the query.
    async fn set(&self, query: &DnsQuery, records: &[AddressRecord]) -> Result<(), DomainError>;

    /// Drops expired sets and expired records; returns the number of keys removed.
    async fn purge_expired(&self) -> Result<usize, DomainError>;

    /// Removes the set stored for the query; returns whether one existed.
    async fn delete(&self, query: &DnsQuery) -> Result<bool, DomainError>;

    /// Deletes every key; returns how many were removed.
    async fn clear_all(&self) -> Result<usize, DomainError>;

    async fn view_all(&self) -> Result<Vec<CacheEntrySnapshot>, DomainError>;
}

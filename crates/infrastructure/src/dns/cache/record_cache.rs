use super::sqlite_store::{unix_now, SqliteResponseCache};
use async_trait::async_trait;
use rootwalk_application::ports::{CacheEntrySnapshot, RecordCache};
use rootwalk_domain::{AddressRecord, DnsQuery, DomainError};
use std::net::Ipv4Addr;
use tracing::debug;

#[async_trait]
impl RecordCache for SqliteResponseCache {
    async fn get(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError> {
        let live = SqliteResponseCache::get(
            self,
            &query.domain,
            query.record_type.as_str(),
            query.record_class.as_str(),
        )
        .await?;

        Ok(live
            .into_iter()
            .filter_map(|record| match record.value.parse::<Ipv4Addr>() {
                Ok(address) => Some(AddressRecord::new(address, record.ttl)),
                Err(_) => {
                    debug!(value = %record.value, "Skipping non-IPv4 cached value");
                    None
                }
            })
            .collect())
    }

    async fn set(&self, query: &DnsQuery, records: &[AddressRecord]) -> Result<(), DomainError> {
        let values: Vec<(String, u32)> = records
            .iter()
            .map(|r| (r.address.to_string(), r.ttl))
            .collect();
        SqliteResponseCache::set(
            self,
            &query.domain,
            query.record_type.as_str(),
            query.record_class.as_str(),
            &values,
        )
        .await
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        SqliteResponseCache::purge_expired(self, unix_now()).await
    }

    async fn delete(&self, query: &DnsQuery) -> Result<bool, DomainError> {
        SqliteResponseCache::delete_key(
            self,
            &query.domain,
            query.record_type.as_str(),
            query.record_class.as_str(),
        )
        .await
    }

    async fn clear_all(&self) -> Result<usize, DomainError> {
        SqliteResponseCache::clear_all(self).await
    }

    async fn view_all(&self) -> Result<Vec<CacheEntrySnapshot>, DomainError> {
        Ok(SqliteResponseCache::view_all(self)
            .await?
            .into_iter()
            .map(|(key, value)| CacheEntrySnapshot { key, value })
            .collect())
    }
}

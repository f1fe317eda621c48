use crate::ports::RecordCache;
use rootwalk_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use tracing::info;

pub struct DeleteCacheEntryUseCase {
    cache: Arc<dyn RecordCache>,
}

impl DeleteCacheEntryUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self, query: &DnsQuery) -> Result<bool, DomainError> {
        let existed = self.cache.delete(query).await?;
        info!(
            domain = %query.domain,
            record_type = %query.record_type,
            existed,
            "Cache entry deleted"
        );
        Ok(existed)
    }
}

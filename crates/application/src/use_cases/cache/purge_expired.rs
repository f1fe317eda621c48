use crate::ports::RecordCache;
use rootwalk_domain::DomainError;
use std::sync::Arc;
use tracing::debug;

pub struct PurgeExpiredCacheUseCase {
    cache: Arc<dyn RecordCache>,
}

impl PurgeExpiredCacheUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<usize, DomainError> {
        let removed = self.cache.purge_expired().await?;
        debug!(removed, "Expired cache entries purged");
        Ok(removed)
    }
}

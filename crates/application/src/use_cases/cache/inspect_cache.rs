use crate::ports::{CacheEntrySnapshot, RecordCache};
use rootwalk_domain::DomainError;
use std::sync::Arc;

pub struct InspectCacheUseCase {
    cache: Arc<dyn RecordCache>,
}

impl InspectCacheUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<Vec<CacheEntrySnapshot>, DomainError> {
        let mut entries = self.cache.view_all().await?;
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

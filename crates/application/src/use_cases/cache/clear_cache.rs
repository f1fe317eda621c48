use crate::ports::RecordCache;
use rootwalk_domain::DomainError;
use std::sync::Arc;
use tracing::info;

pub struct ClearCacheUseCase {
    cache: Arc<dyn RecordCache>,
}

impl ClearCacheUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<usize, DomainError> {
        let removed = self.cache.clear_all().await?;
        info!(removed, "Response cache cleared");
        Ok(removed)
    }
}

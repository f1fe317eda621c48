use crate::ports::{CacheMaintenancePort, CachePurgeOutcome, CacheResetOutcome, RecordCache};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::sync::Arc;

/// Adapts the record cache to the maintenance port driven by background jobs.
pub struct CacheMaintenanceService {
    cache: Arc<dyn RecordCache>,
}

impl CacheMaintenanceService {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for CacheMaintenanceService {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError> {
        let entries_removed = self.cache.purge_expired().await?;
        Ok(CachePurgeOutcome { entries_removed })
    }

    async fn run_reset(&self) -> Result<CacheResetOutcome, DomainError> {
        let entries_removed = self.cache.clear_all().await?;
        Ok(CacheResetOutcome { entries_removed })
    }
}

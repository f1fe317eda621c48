use async_trait::async_trait;
use rootwalk_domain::DomainError;

/// Outcome of an expiry sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CachePurgeOutcome {
    pub entries_removed: usize,
}

/// Outcome of a full cache reset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheResetOutcome {
    pub entries_removed: usize,
}

/// Port for background cache maintenance (expiry sweep + daily reset).
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError>;

    async fn run_reset(&self) -> Result<CacheResetOutcome, DomainError>;
}

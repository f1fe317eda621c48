pub mod cache;
pub mod dns;

// Re-export use cases
pub use cache::{
    CacheMaintenanceService, ClearCacheUseCase, DeleteCacheEntryUseCase, InspectCacheUseCase,
    PurgeExpiredCacheUseCase,
};
pub use dns::ResolveDomainUseCase;

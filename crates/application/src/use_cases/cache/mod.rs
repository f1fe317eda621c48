mod clear_cache;
mod delete_entry;
mod inspect_cache;
mod maintenance;
mod purge_expired;

pub use clear_cache::ClearCacheUseCase;
pub use delete_entry::DeleteCacheEntryUseCase;
pub use inspect_cache::InspectCacheUseCase;
pub use maintenance::CacheMaintenanceService;
pub use purge_expired::PurgeExpiredCacheUseCase;

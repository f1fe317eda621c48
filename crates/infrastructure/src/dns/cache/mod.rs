pub mod entry;
mod record_cache;
pub mod sqlite_store;

pub use entry::{cache_key, CacheEntry, LiveRecord, StoredRecord};
pub use sqlite_store::SqliteResponseCache;

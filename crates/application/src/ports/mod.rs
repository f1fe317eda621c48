mod cache_maintenance_port;
mod dns_resolver;
mod query_log_sink;
mod record_cache;
mod root_rotation_port;

pub use cache_maintenance_port::{CacheMaintenancePort, CachePurgeOutcome, CacheResetOutcome};
pub use dns_resolver::{DnsResolution, DnsResolver};
pub use query_log_sink::QueryLogSink;
pub use record_cache::{CacheEntrySnapshot, RecordCache};
pub use root_rotation_port::RootRotationPort;

// Re-export for convenience
pub use rootwalk_domain::DnsQuery;

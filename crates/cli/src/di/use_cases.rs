use super::DnsServices;
use rootwalk_application::ports::{CacheMaintenancePort, QueryLogSink, RecordCache};
use rootwalk_application::use_cases::{
    CacheMaintenanceService, ClearCacheUseCase, DeleteCacheEntryUseCase, InspectCacheUseCase,
    PurgeExpiredCacheUseCase, ResolveDomainUseCase,
};
use rootwalk_domain::Config;
use rootwalk_infrastructure::dns::{JsonFileQueryLog, SqliteResponseCache};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub clear_cache: Arc<ClearCacheUseCase>,
    pub delete_cache_entry: Arc<DeleteCacheEntryUseCase>,
    pub purge_cache: Arc<PurgeExpiredCacheUseCase>,
    pub inspect_cache: Arc<InspectCacheUseCase>,
    pub maintenance: Arc<dyn CacheMaintenancePort>,
}

impl UseCases {
    pub fn new(pool: SqlitePool) -> Self {
        let cache = Self::cache(pool);
        Self {
            clear_cache: Arc::new(ClearCacheUseCase::new(cache.clone())),
            delete_cache_entry: Arc::new(DeleteCacheEntryUseCase::new(cache.clone())),
            purge_cache: Arc::new(PurgeExpiredCacheUseCase::new(cache.clone())),
            inspect_cache: Arc::new(InspectCacheUseCase::new(cache.clone())),
            maintenance: Arc::new(CacheMaintenanceService::new(cache)),
        }
    }

    pub fn resolve(config: &Config, dns: &DnsServices, pool: SqlitePool) -> ResolveDomainUseCase {
        let mut use_case = ResolveDomainUseCase::new(dns.resolver.clone(), Self::cache(pool))
            .with_resolve_timeout(Duration::from_millis(config.resolver.resolve_timeout_ms))
            .with_purge_on_resolve(config.resolver.purge_on_resolve);

        if config.query_log.enabled {
            let sink: Arc<dyn QueryLogSink> = Arc::new(JsonFileQueryLog::new(
                &config.query_log.path,
                config.query_log.max_entries,
            ));
            use_case = use_case.with_query_log(sink);
        }
        use_case
    }

    fn cache(pool: SqlitePool) -> Arc<dyn RecordCache> {
        Arc::new(SqliteResponseCache::new(pool))
    }
}

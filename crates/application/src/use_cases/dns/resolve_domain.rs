use crate::ports::{DnsResolution, DnsResolver, QueryLogSink, RecordCache};
use chrono::Utc;
use rootwalk_domain::query_log::request_id;
use rootwalk_domain::{DnsQuery, DomainError, QueryLog, ResolveRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);
const UNKNOWN_CLIENT: &str = "unknown";

/// Cache-first resolution: purge, look up, walk the delegation chain on a
/// miss, write through, and record one query event per call.
pub struct ResolveDomainUseCase {
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<dyn RecordCache>,
    query_log: Option<Arc<dyn QueryLogSink>>,
    resolve_timeout: Duration,
    purge_on_resolve: bool,
}

impl ResolveDomainUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, cache: Arc<dyn RecordCache>) -> Self {
        Self {
            resolver,
            cache,
            query_log: None,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            purge_on_resolve: true,
        }
    }

    pub fn with_query_log(mut self, query_log: Arc<dyn QueryLogSink>) -> Self {
        self.query_log = Some(query_log);
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub fn with_purge_on_resolve(mut self, enabled: bool) -> Self {
        self.purge_on_resolve = enabled;
        self
    }

    /// String-level entry: parses the request and resolves it. A request
    /// that fails to parse is still recorded as one query event.
    pub async fn execute_raw(
        &self,
        domain: &str,
        record_type: &str,
        record_class: &str,
        client_id: Option<&str>,
    ) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();

        match ResolveRequest::parse(domain, record_type, record_class, client_id) {
            Ok(request) => self.execute(&request).await,
            Err(e) => {
                let entry = QueryLog::new(
                    request_id(fastrand::u32(..)),
                    Utc::now(),
                    client_id.unwrap_or(UNKNOWN_CLIENT),
                    domain.trim(),
                    record_type.trim(),
                    e.result_code(),
                    start.elapsed().as_millis() as u64,
                    false,
                );
                self.record(entry).await;
                Err(e)
            }
        }
    }

    pub async fn execute(&self, request: &ResolveRequest) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();

        let outcome = self.resolve(&request.query).await;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (rcode, cached) = match &outcome {
            Ok(resolution) => ("NOERROR", resolution.cache_hit),
            Err(e) => (e.result_code(), false),
        };

        let entry = QueryLog::new(
            request_id(fastrand::u32(..)),
            Utc::now(),
            &request.client_id,
            request.domain(),
            request.query.record_type.as_str(),
            rcode,
            latency_ms,
            cached,
        );
        self.record(entry).await;

        outcome
    }

    async fn record(&self, entry: QueryLog) {
        info!(
            id = %entry.id,
            domain = %entry.domain,
            rcode = %entry.rcode,
            cached = entry.cached,
            latency_ms = entry.latency_ms,
            "Query resolved"
        );

        if let Some(sink) = &self.query_log {
            if let Err(e) = sink.append(&entry).await {
                warn!(error = %e, domain = %entry.domain, "Failed to write query log (non-critical)");
            }
        }
    }

    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        if self.purge_on_resolve {
            if let Err(e) = self.cache.purge_expired().await {
                warn!(error = %e, "Cache purge failed, continuing");
            }
        }

        match self.cache.get(query).await {
            Ok(records) if !records.is_empty() => {
                debug!(domain = %query.domain, records = records.len(), "Cache hit");
                return Ok(DnsResolution::new(records, true));
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, domain = %query.domain, "Cache read failed, resolving upstream");
            }
        }

        let records = match tokio::time::timeout(self.resolve_timeout, self.resolver.resolve(query))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(DomainError::ResolutionTimeout {
                    timeout_ms: self.resolve_timeout.as_millis() as u64,
                })
            }
        };

        if records.is_empty() {
            return Err(DomainError::NxDomain);
        }

        if let Err(e) = self.cache.set(query, &records).await {
            warn!(error = %e, domain = %query.domain, "Failed to cache resolution");
        }

        Ok(DnsResolution::new(records, false))
    }
}

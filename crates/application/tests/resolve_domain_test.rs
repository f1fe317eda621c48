mod helpers;

use helpers::{record, InMemoryRecordCache, MockDnsResolver, MockQueryLogSink};
use rootwalk_application::use_cases::ResolveDomainUseCase;
use rootwalk_domain::{DomainError, ResolveRequest};
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    resolver: Arc<MockDnsResolver>,
    cache: Arc<InMemoryRecordCache>,
    log: Arc<MockQueryLogSink>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            resolver: Arc::new(MockDnsResolver::new()),
            cache: Arc::new(InMemoryRecordCache::new()),
            log: Arc::new(MockQueryLogSink::new()),
        }
    }

    fn use_case(&self) -> ResolveDomainUseCase {
        ResolveDomainUseCase::new(self.resolver.clone(), self.cache.clone())
            .with_query_log(self.log.clone())
    }
}

// ── miss → resolve → write-through ─────────────────────────────────────────

#[tokio::test]
async fn test_miss_resolves_and_writes_through() {
    let fx = Fixture::new();
    fx.resolver
        .set_response("example.com", vec![record("93.184.216.34", 300)]);

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("example.com"))
        .await
        .unwrap();

    assert!(!result.cache_hit);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].address.to_string(), "93.184.216.34");
    assert_eq!(result.records[0].ttl, 300);
    assert_eq!(fx.cache.set_calls(), 1);
    assert_eq!(fx.resolver.call_count(), 1);
}

#[tokio::test]
async fn test_second_call_is_served_from_cache_without_resolving() {
    let fx = Fixture::new();
    fx.resolver
        .set_response("example.com", vec![record("93.184.216.34", 300)]);
    let use_case = fx.use_case();

    let first = use_case
        .execute(&ResolveRequest::new("example.com"))
        .await
        .unwrap();
    let second = use_case
        .execute(&ResolveRequest::new("example.com"))
        .await
        .unwrap();

    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(first.records, second.records);
    assert_eq!(fx.resolver.call_count(), 1);

    let logs = fx.log.entries();
    assert_eq!(logs.len(), 2);
    assert!(!logs[0].cached);
    assert!(logs[1].cached);
}

#[tokio::test]
async fn test_purge_runs_before_each_lookup() {
    let fx = Fixture::new();
    fx.resolver.set_response("a.test", vec![record("10.0.0.1", 60)]);
    let use_case = fx.use_case();

    use_case.execute(&ResolveRequest::new("a.test")).await.unwrap();
    use_case.execute(&ResolveRequest::new("a.test")).await.unwrap();

    assert_eq!(fx.cache.purge_calls(), 2);
}

#[tokio::test]
async fn test_purge_can_be_disabled() {
    let fx = Fixture::new();
    fx.resolver.set_response("a.test", vec![record("10.0.0.1", 60)]);

    fx.use_case()
        .with_purge_on_resolve(false)
        .execute(&ResolveRequest::new("a.test"))
        .await
        .unwrap();

    assert_eq!(fx.cache.purge_calls(), 0);
}

// ── failure paths ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_answer_is_nxdomain_and_not_cached() {
    let fx = Fixture::new();
    fx.resolver.set_response("empty.test", vec![]);

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("empty.test"))
        .await;

    assert!(matches!(result, Err(DomainError::NxDomain)));
    assert_eq!(fx.cache.set_calls(), 0);
    assert_eq!(fx.cache.len(), 0);

    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rcode, "NXDOMAIN");
}

#[tokio::test]
async fn test_resolver_fault_is_surfaced_and_logged_once() {
    let fx = Fixture::new();
    fx.resolver.set_error(
        "down.test",
        DomainError::ServerSetExhausted { phase: "tld" },
    );

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("down.test"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ServerSetExhausted { phase: "tld" })
    ));
    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rcode, "SERVFAIL");
    assert!(!logs[0].cached);
}

#[tokio::test]
async fn test_no_root_server_is_surfaced() {
    let fx = Fixture::new();
    fx.resolver
        .set_error("example.com", DomainError::NoRootServerAvailable);

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("example.com"))
        .await;

    assert!(matches!(result, Err(DomainError::NoRootServerAvailable)));
    assert_eq!(fx.log.entries().len(), 1);
}

#[tokio::test]
async fn test_slow_resolution_is_cut_off_by_resolve_timeout() {
    let fx = Fixture::new();
    fx.resolver.set_response("slow.test", vec![record("10.0.0.9", 60)]);
    fx.resolver.set_delay(Duration::from_millis(500));

    let result = fx
        .use_case()
        .with_resolve_timeout(Duration::from_millis(50))
        .execute(&ResolveRequest::new("slow.test"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::ResolutionTimeout { timeout_ms: 50 })
    ));
    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rcode, "TIMEOUT");
}

// ── string-level entry ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_raw_entry_resolves_and_records_client() {
    let fx = Fixture::new();
    fx.resolver
        .set_response("example.com", vec![record("93.184.216.34", 300)]);

    let result = fx
        .use_case()
        .execute_raw("example.com.", "a", "in", Some("10.0.0.7"))
        .await
        .unwrap();

    assert!(!result.cache_hit);
    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].client_ip, "10.0.0.7");
    assert_eq!(logs[0].domain, "example.com");
    assert_eq!(logs[0].rcode, "NOERROR");
}

#[tokio::test]
async fn test_unknown_type_is_refused_and_still_logged() {
    let fx = Fixture::new();

    let result = fx
        .use_case()
        .execute_raw("example.com", "FOO", "IN", None)
        .await;

    assert!(matches!(result, Err(DomainError::UnsupportedRecordType(_))));
    assert_eq!(fx.resolver.call_count(), 0);
    assert_eq!(fx.cache.purge_calls(), 0);

    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].rcode, "REFUSED");
    assert_eq!(logs[0].query_type, "FOO");
    assert_eq!(logs[0].client_ip, "unknown");
    assert!(!logs[0].cached);
}

#[tokio::test]
async fn test_unknown_class_and_empty_name_are_logged_once_each() {
    let fx = Fixture::new();
    let use_case = fx.use_case();

    let bad_class = use_case.execute_raw("example.com", "A", "XX", None).await;
    let empty = use_case.execute_raw("  ", "A", "IN", Some("cli")).await;

    assert!(matches!(bad_class, Err(DomainError::UnsupportedRecordClass(_))));
    assert!(matches!(empty, Err(DomainError::InvalidDomainName(_))));

    let logs = fx.log.entries();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|l| l.rcode == "REFUSED"));
    assert_eq!(logs[1].client_ip, "cli");
    assert_eq!(fx.resolver.call_count(), 0);
}

// ── best-effort collaborators ──────────────────────────────────────────────

#[tokio::test]
async fn test_log_sink_failure_does_not_fail_resolution() {
    let fx = Fixture::new();
    fx.resolver.set_response("ok.test", vec![record("10.0.0.2", 60)]);
    fx.log.set_should_fail(true);

    let result = fx.use_case().execute(&ResolveRequest::new("ok.test")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cache_write_failure_still_returns_answer() {
    let fx = Fixture::new();
    fx.resolver.set_response("ok.test", vec![record("10.0.0.2", 60)]);
    fx.cache.set_fail_writes(true);

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("ok.test"))
        .await
        .unwrap();

    assert_eq!(result.records.len(), 1);
}

#[tokio::test]
async fn test_cache_read_failure_falls_back_to_resolver() {
    let fx = Fixture::new();
    fx.resolver.set_response("ok.test", vec![record("10.0.0.2", 60)]);
    fx.cache.set_fail_reads(true);

    let result = fx
        .use_case()
        .execute(&ResolveRequest::new("ok.test"))
        .await
        .unwrap();

    assert!(!result.cache_hit);
    assert_eq!(fx.resolver.call_count(), 1);
}

// ── query log contents ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_log_entry_carries_request_fields() {
    let fx = Fixture::new();
    fx.resolver
        .set_response("example.com", vec![record("93.184.216.34", 300)]);

    let request = ResolveRequest::parse("example.com", "a", "in", Some("user-7")).unwrap();
    fx.use_case().execute(&request).await.unwrap();

    let logs = fx.log.entries();
    assert_eq!(logs.len(), 1);
    let entry = &logs[0];
    assert!(entry.id.starts_with("req_"));
    assert_eq!(entry.id.len(), 12);
    assert!(entry.timestamp.ends_with('Z'));
    assert_eq!(entry.client_ip, "user-7");
    assert_eq!(entry.domain, "example.com");
    assert_eq!(entry.query_type, "A");
    assert_eq!(entry.rcode, "NOERROR");
    assert_eq!(entry.protocol, "UDP");
}

#[tokio::test]
async fn test_without_sink_resolution_still_works() {
    let fx = Fixture::new();
    fx.resolver.set_response("a.test", vec![record("10.0.0.1", 60)]);

    let use_case = ResolveDomainUseCase::new(fx.resolver.clone(), fx.cache.clone());
    let result = use_case.execute(&ResolveRequest::new("a.test")).await;

    assert!(result.is_ok());
    assert!(fx.log.entries().is_empty());
}

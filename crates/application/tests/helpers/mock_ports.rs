#![allow(dead_code)]

use async_trait::async_trait;
use rootwalk_application::ports::{
    CacheEntrySnapshot, DnsResolver, QueryLogSink, RecordCache,
};
use rootwalk_domain::{AddressRecord, DnsQuery, DomainError, QueryLog};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn record(ip: &str, ttl: u32) -> AddressRecord {
    AddressRecord::new(ip.parse::<Ipv4Addr>().unwrap(), ttl)
}

fn cache_key(query: &DnsQuery) -> String {
    format!(
        "{}|{}|{}",
        query.domain.to_lowercase(),
        query.record_type,
        query.record_class
    )
}

#[derive(Default)]
pub struct MockDnsResolver {
    responses: Mutex<HashMap<String, Result<Vec<AddressRecord>, DomainError>>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_response(&self, domain: &str, records: Vec<AddressRecord>) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), Ok(records));
    }

    pub fn set_error(&self, domain: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert(domain.to_string(), Err(error));
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or(Err(DomainError::NxDomain))
    }
}

#[derive(Default)]
pub struct InMemoryRecordCache {
    entries: Mutex<HashMap<String, Vec<AddressRecord>>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
    purge_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl InMemoryRecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap() = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn purge_calls(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordCache for InMemoryRecordCache {
    async fn get(&self, query: &DnsQuery) -> Result<Vec<AddressRecord>, DomainError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(DomainError::CacheStore("read failed".to_string()));
        }
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(&cache_key(query))
            .cloned()
            .unwrap_or_default())
    }

    async fn set(&self, query: &DnsQuery, records: &[AddressRecord]) -> Result<(), DomainError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_writes.lock().unwrap() {
            return Err(DomainError::CacheStore("write failed".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(cache_key(query), records.to_vec());
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        Ok(0)
    }

    async fn delete(&self, query: &DnsQuery) -> Result<bool, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .remove(&cache_key(query))
            .is_some())
    }

    async fn clear_all(&self) -> Result<usize, DomainError> {
        let mut entries = self.entries.lock().unwrap();
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    async fn view_all(&self) -> Result<Vec<CacheEntrySnapshot>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(key, records)| CacheEntrySnapshot {
                key: key.clone(),
                value: serde_json::json!({ "records": records.len() }),
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MockQueryLogSink {
    entries: Mutex<Vec<QueryLog>>,
    should_fail: Mutex<bool>,
}

impl MockQueryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    pub fn entries(&self) -> Vec<QueryLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryLogSink for MockQueryLogSink {
    async fn append(&self, entry: &QueryLog) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::QueryLog("disk full".to_string()));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<QueryLog>, DomainError> {
        let entries = self.entries.lock().unwrap();
        let skip = entries.len().saturating_sub(limit);
        Ok(entries[skip..].to_vec())
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}

use async_trait::async_trait;
use rootwalk_application::ports::{
    CacheMaintenancePort, CachePurgeOutcome, CacheResetOutcome, RootRotationPort,
};
use rootwalk_domain::{DomainError, RootServer, SelectedRoot};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct MockCacheMaintenancePort {
    purge_call_count: Arc<AtomicU64>,
    reset_call_count: Arc<AtomicU64>,
    should_fail: Arc<AtomicBool>,
    purge_outcome: CachePurgeOutcome,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            purge_call_count: Arc::new(AtomicU64::new(0)),
            reset_call_count: Arc::new(AtomicU64::new(0)),
            should_fail: Arc::new(AtomicBool::new(false)),
            purge_outcome: CachePurgeOutcome::default(),
        }
    }

    pub fn with_purge_outcome(mut self, outcome: CachePurgeOutcome) -> Self {
        self.purge_outcome = outcome;
        self
    }

    pub fn purge_call_count(&self) -> u64 {
        self.purge_call_count.load(Ordering::Relaxed)
    }

    pub fn reset_call_count(&self) -> u64 {
        self.reset_call_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_purge_cycle(&self) -> Result<CachePurgeOutcome, DomainError> {
        self.purge_call_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::CacheStore("mock purge failure".into()));
        }
        Ok(self.purge_outcome.clone())
    }

    async fn run_reset(&self) -> Result<CacheResetOutcome, DomainError> {
        self.reset_call_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::CacheStore("mock reset failure".into()));
        }
        Ok(CacheResetOutcome::default())
    }
}

/// Answers every rotation with the same root, or with nothing.
pub struct MockRootRotation {
    call_count: Arc<AtomicU64>,
    answer: Option<SelectedRoot>,
}

impl MockRootRotation {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicU64::new(0)),
            answer: Some(SelectedRoot {
                server: RootServer::new("a.root-servers.net", Ipv4Addr::new(198, 41, 0, 4)),
                latency: Duration::from_millis(12),
            }),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            answer: None,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RootRotationPort for MockRootRotation {
    async fn rotate(&self) -> Result<Option<SelectedRoot>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.answer.clone())
    }
}

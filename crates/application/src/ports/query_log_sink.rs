use async_trait::async_trait;
use rootwalk_domain::{DomainError, QueryLog};

#[async_trait]
pub trait QueryLogSink: Send + Sync {
    async fn append(&self, entry: &QueryLog) -> Result<(), DomainError>;
    async fn recent(&self, limit: usize) -> Result<Vec<QueryLog>, DomainError>;
}

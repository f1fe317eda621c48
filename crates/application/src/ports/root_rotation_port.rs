use async_trait::async_trait;
use rootwalk_domain::{DomainError, SelectedRoot};

/// Re-runs root selection and swaps the entry point used by new resolutions.
#[async_trait]
pub trait RootRotationPort: Send + Sync {
    async fn rotate(&self) -> Result<Option<SelectedRoot>, DomainError>;
}

use async_trait::async_trait;
use rootwalk_application::ports::QueryLogSink;
use rootwalk_domain::{DomainError, QueryLog};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Query events kept as a single JSON array file, newest last, trimmed to
/// the most recent `max_entries`.
///
/// Each append rewrites the file through a sibling temp file and a rename,
/// so readers never see a half-written array.
pub struct JsonFileQueryLog {
    path: PathBuf,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl JsonFileQueryLog {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries: max_entries.max(1),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_entries(&self) -> Result<Vec<QueryLog>, DomainError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Query log unreadable, starting a new one");
                Ok(Vec::new())
            }
        }
    }

    async fn write_entries(&self, entries: &[QueryLog]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error(parent, e))?;
            }
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| DomainError::QueryLog(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;
        Ok(())
    }
}

#[async_trait]
impl QueryLogSink for JsonFileQueryLog {
    async fn append(&self, entry: &QueryLog) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.push(entry.clone());
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(..excess);
        }

        self.write_entries(&entries).await?;
        debug!(id = %entry.id, total = entries.len(), "Query event appended");
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<QueryLog>, DomainError> {
        let _guard = self.write_lock.lock().await;
        let entries = self.read_entries().await?;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries.into_iter().skip(skip).collect())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> DomainError {
    DomainError::QueryLog(format!("{}: {}", path.display(), e))
}

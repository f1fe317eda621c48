use super::entry::{cache_key, CacheEntry, LiveRecord, Sweep};
use rootwalk_domain::DomainError;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// TTL-governed record sets persisted in SQLite, one JSON value per key.
pub struct SqliteResponseCache {
    pool: SqlitePool,
}

impl SqliteResponseCache {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(
        &self,
        name: &str,
        rtype: &str,
        rclass: &str,
    ) -> Result<Vec<LiveRecord>, DomainError> {
        self.get_at(name, rtype, rclass, unix_now()).await
    }

    pub async fn get_at(
        &self,
        name: &str,
        rtype: &str,
        rclass: &str,
        now: f64,
    ) -> Result<Vec<LiveRecord>, DomainError> {
        let key = cache_key(name, rtype, rclass);
        let row = sqlx::query("SELECT value FROM dns_cache WHERE key = ?")
            .bind(&key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let raw: String = row.get("value");
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) => Ok(entry.live_records(now)),
            Err(e) => {
                warn!(key = %key, error = %e, "Undecodable cache value, treating as miss");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the record set stored for the key.
    pub async fn set(
        &self,
        name: &str,
        rtype: &str,
        rclass: &str,
        values: &[(String, u32)],
    ) -> Result<(), DomainError> {
        self.set_at(name, rtype, rclass, values, unix_now()).await
    }

    pub async fn set_at(
        &self,
        name: &str,
        rtype: &str,
        rclass: &str,
        values: &[(String, u32)],
        now: f64,
    ) -> Result<(), DomainError> {
        let key = cache_key(name, rtype, rclass);
        let entry = CacheEntry::new(values.iter().map(|(v, ttl)| (v.as_str(), *ttl)), now);
        let value = encode(&entry)?;

        sqlx::query(
            "INSERT INTO dns_cache (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(&key)
        .bind(&value)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        debug!(key = %key, records = entry.records.len(), "Cache entry written");
        Ok(())
    }

    /// Sweeps every key in one transaction. Expired sets and undecodable
    /// values are deleted; sets with some dead records are rewritten.
    /// Returns the number of keys deleted.
    pub async fn purge_expired(&self, now: f64) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let rows = sqlx::query("SELECT key, value FROM dns_cache")
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error)?;

        let mut removed = 0usize;
        for row in rows {
            let key: String = row.get("key");
            let raw: String = row.get("value");

            let sweep = match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(entry) => entry.sweep(now),
                Err(_) => Sweep::Delete,
            };

            match sweep {
                Sweep::Keep => {}
                Sweep::Delete => {
                    sqlx::query("DELETE FROM dns_cache WHERE key = ?")
                        .bind(&key)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_error)?;
                    removed += 1;
                }
                Sweep::Rewrite(entry) => {
                    sqlx::query("UPDATE dns_cache SET value = ? WHERE key = ?")
                        .bind(encode(&entry)?)
                        .bind(&key)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_error)?;
                }
            }
        }

        tx.commit().await.map_err(db_error)?;

        if removed > 0 {
            debug!(removed, "Expired cache entries purged");
        }
        Ok(removed)
    }

    pub async fn clear_all(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM dns_cache")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() as usize)
    }

    /// Returns whether the key existed.
    pub async fn delete_key(
        &self,
        name: &str,
        rtype: &str,
        rclass: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM dns_cache WHERE key = ?")
            .bind(cache_key(name, rtype, rclass))
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    /// Every stored value as JSON, unfiltered, ordered by key.
    pub async fn view_all(&self) -> Result<Vec<(String, Value)>, DomainError> {
        let rows = sqlx::query("SELECT key, value FROM dns_cache ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let key: String = row.get("key");
                let raw: String = row.get("value");
                let value = serde_json::from_str(&raw).unwrap_or_else(
                    |_| serde_json::json!({ "_error": "unable to decode value" }),
                );
                (key, value)
            })
            .collect())
    }

    pub async fn len(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dns_cache")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count as usize)
    }

    pub async fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len().await? == 0)
    }
}

pub(crate) fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn encode(entry: &CacheEntry) -> Result<String, DomainError> {
    serde_json::to_string(entry).map_err(|e| DomainError::CacheStore(e.to_string()))
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::CacheStore(format!("Database error: {}", e))
}

use serde::{Deserialize, Serialize};

/// `lowercase(name)|TYPE|CLASS`
pub fn cache_key(name: &str, rtype: &str, rclass: &str) -> String {
    format!(
        "{}|{}|{}",
        name.to_lowercase(),
        rtype.to_uppercase(),
        rclass.to_uppercase()
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub value: String,
    pub ttl: u32,
    pub cached_at: f64,
    pub expires_at: f64,
}

/// Stored value of one key. Times are Unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub records: Vec<StoredRecord>,
    #[serde(default)]
    pub set_expires_at: f64,
}

/// A record still alive at lookup time, TTL counted down to the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveRecord {
    pub value: String,
    pub ttl: u32,
}

/// What a sweep does with one entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Sweep {
    Keep,
    Delete,
    Rewrite(CacheEntry),
}

impl CacheEntry {
    /// The set expires with its shortest-lived record; an empty set is
    /// expired the moment it is written.
    pub fn new<'a>(values: impl IntoIterator<Item = (&'a str, u32)>, now: f64) -> Self {
        let records: Vec<StoredRecord> = values
            .into_iter()
            .map(|(value, ttl)| StoredRecord {
                value: value.to_string(),
                ttl,
                cached_at: now,
                expires_at: now + f64::from(ttl),
            })
            .collect();

        let set_expires_at = min_expiry(&records).unwrap_or(now);
        Self {
            records,
            set_expires_at,
        }
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.set_expires_at
    }

    /// Records with `expires_at > now`, first occurrence of each value only.
    pub fn live_records(&self, now: f64) -> Vec<LiveRecord> {
        if self.is_expired(now) {
            return Vec::new();
        }

        let mut live: Vec<LiveRecord> = Vec::with_capacity(self.records.len());
        for record in self.records.iter().filter(|r| r.expires_at > now) {
            if live.iter().any(|l| l.value == record.value) {
                continue;
            }
            live.push(LiveRecord {
                value: record.value.clone(),
                ttl: (record.expires_at - now) as u32,
            });
        }
        live
    }

    pub fn sweep(&self, now: f64) -> Sweep {
        if self.set_expires_at <= now {
            return Sweep::Delete;
        }

        let survivors: Vec<StoredRecord> = self
            .records
            .iter()
            .filter(|r| r.expires_at > now)
            .cloned()
            .collect();
        if survivors.len() == self.records.len() {
            return Sweep::Keep;
        }

        let set_expires_at = min_expiry(&survivors).unwrap_or(0.0);
        Sweep::Rewrite(Self {
            records: survivors,
            set_expires_at,
        })
    }
}

fn min_expiry(records: &[StoredRecord]) -> Option<f64> {
    records.iter().map(|r| r.expires_at).reduce(f64::min)
}

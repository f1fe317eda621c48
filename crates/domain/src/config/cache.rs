use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// SQLite file backing the response cache.
    #[serde(default = "default_cache_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,

    /// Interval of the background expiry sweep. 0 disables the job.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,

    #[serde(default)]
    pub daily_reset: bool,

    #[serde(default)]
    pub reset_at_utc_hour: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: default_cache_path(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
            purge_interval_secs: default_purge_interval_secs(),
            daily_reset: false,
            reset_at_utc_hour: 0,
        }
    }
}

fn default_cache_path() -> String {
    "global_cache/dns_cache.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    5
}

fn default_purge_interval_secs() -> u64 {
    300
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryLogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_query_log_path")]
    pub path: String,

    /// Only the most recent `max_entries` events are kept in the file.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_query_log_path(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_query_log_path() -> String {
    "dns_queries.json".to_string()
}

fn default_max_entries() -> usize {
    1000
}

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One resolution as recorded for the dashboard. The field names are the
/// JSON schema of the query-event file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLog {
    pub id: String,
    pub timestamp: String,
    pub client_ip: String,
    pub domain: String,
    pub query_type: String,
    pub rcode: String,
    pub latency_ms: u64,
    pub protocol: String,
    pub cached: bool,
}

impl QueryLog {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        at: DateTime<Utc>,
        client_ip: &str,
        domain: &str,
        query_type: &str,
        rcode: &str,
        latency_ms: u64,
        cached: bool,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: format_timestamp(at),
            client_ip: client_ip.to_string(),
            domain: domain.to_string(),
            query_type: query_type.to_string(),
            rcode: rcode.to_string(),
            latency_ms,
            protocol: "UDP".to_string(),
            cached,
        }
    }
}

/// `req_` followed by eight lowercase hex digits.
pub fn request_id(raw: u32) -> String {
    format!("req_{:08x}", raw)
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

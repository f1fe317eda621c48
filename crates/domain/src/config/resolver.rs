use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root hints file in named.root format. The bundled IANA copy is used
    /// when unset.
    #[serde(default)]
    pub root_hints_path: Option<String>,

    /// Bound on every single send/receive exchange.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Bound on a whole resolution, including every nested referral chase.
    #[serde(default = "default_resolve_timeout_ms")]
    pub resolve_timeout_ms: u64,

    #[serde(default = "default_max_referral_depth")]
    pub max_referral_depth: u8,

    #[serde(default = "default_edns_payload_size")]
    pub edns_payload_size: u16,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound of sockets open at the same time across all resolutions.
    #[serde(default = "default_max_sockets")]
    pub max_sockets: usize,

    /// Idle sockets kept around for reuse.
    #[serde(default = "default_pooled_sockets")]
    pub pooled_sockets: usize,

    /// Re-run the latency probe periodically. 0 disables rotation.
    #[serde(default)]
    pub root_reprobe_interval_secs: u64,

    #[serde(default = "default_true")]
    pub purge_on_resolve: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_hints_path: None,
            query_timeout_ms: default_query_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            resolve_timeout_ms: default_resolve_timeout_ms(),
            max_referral_depth: default_max_referral_depth(),
            edns_payload_size: default_edns_payload_size(),
            port: default_port(),
            max_sockets: default_max_sockets(),
            pooled_sockets: default_pooled_sockets(),
            root_reprobe_interval_secs: 0,
            purge_on_resolve: true,
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

fn default_resolve_timeout_ms() -> u64 {
    10_000
}

fn default_max_referral_depth() -> u8 {
    8
}

fn default_edns_payload_size() -> u16 {
    4096
}

fn default_port() -> u16 {
    53
}

fn default_max_sockets() -> usize {
    64
}

fn default_pooled_sockets() -> usize {
    16
}

fn default_true() -> bool {
    true
}

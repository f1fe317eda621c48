use rootwalk_domain::config::ResolverConfig;
use std::time::Duration;

/// Knobs of a single walk, fixed for the lifetime of a `ResolverContext`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub query_timeout: Duration,

    pub max_referral_depth: u8,

    pub edns_payload_size: u16,

    pub port: u16,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_millis(2000),
            max_referral_depth: 8,
            edns_payload_size: 4096,
            port: 53,
        }
    }
}

impl ResolverSettings {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            query_timeout: Duration::from_millis(config.query_timeout_ms),
            max_referral_depth: config.max_referral_depth,
            edns_payload_size: config.edns_payload_size,
            port: config.port,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_max_referral_depth(mut self, depth: u8) -> Self {
        self.max_referral_depth = depth;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

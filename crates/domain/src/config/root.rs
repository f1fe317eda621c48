use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::query_log::QueryLogConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "rootwalk.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/rootwalk/config.toml";

/// Main configuration structure for Rootwalk
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Iterative resolution settings (timeouts, depth, sockets)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Persistent response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// JSON query-event file consumed by the dashboard
    #[serde(default)]
    pub query_log: QueryLogConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rootwalk.toml in current directory
    /// 3. /etc/rootwalk/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(hints) = overrides.root_hints_path {
            self.resolver.root_hints_path = Some(hints);
        }
        if let Some(db) = overrides.cache_path {
            self.cache.path = db;
        }
        if let Some(log) = overrides.query_log_path {
            self.query_log.path = log;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolver = &self.resolver;

        if resolver.query_timeout_ms == 0 || resolver.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query and probe timeouts must be greater than 0".to_string(),
            ));
        }
        if resolver.resolve_timeout_ms < resolver.query_timeout_ms {
            return Err(ConfigError::Validation(format!(
                "resolve_timeout_ms ({}) is shorter than query_timeout_ms ({})",
                resolver.resolve_timeout_ms, resolver.query_timeout_ms
            )));
        }
        if resolver.max_referral_depth == 0 {
            return Err(ConfigError::Validation(
                "max_referral_depth must be at least 1".to_string(),
            ));
        }
        if resolver.edns_payload_size < 512 {
            return Err(ConfigError::Validation(format!(
                "edns_payload_size {} is below the 512-byte DNS minimum",
                resolver.edns_payload_size
            )));
        }
        if resolver.max_sockets == 0 {
            return Err(ConfigError::Validation(
                "max_sockets must be greater than 0".to_string(),
            ));
        }
        if self.query_log.max_entries == 0 {
            return Err(ConfigError::Validation(
                "query_log.max_entries must be greater than 0".to_string(),
            ));
        }
        if self.cache.reset_at_utc_hour > 23 {
            return Err(ConfigError::Validation(format!(
                "cache.reset_at_utc_hour {} is not an hour of the day",
                self.cache.reset_at_utc_hour
            )));
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root_hints_path: Option<String>,
    pub cache_path: Option<String>,
    pub query_log_path: Option<String>,
    pub log_level: Option<String>,
}

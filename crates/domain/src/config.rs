pub mod cache;
pub mod errors;
pub mod logging;
pub mod query_log;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use query_log::QueryLogConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};

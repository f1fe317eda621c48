//! Rootwalk Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod query_log;
pub mod root_server;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{DnsQuery, ResolveRequest};
pub use dns_record::{AddressRecord, RecordClass, RecordType};
pub use errors::DomainError;
pub use query_log::QueryLog;
pub use root_server::{RootServer, SelectedRoot};

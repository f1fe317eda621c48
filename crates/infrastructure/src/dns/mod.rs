pub mod cache;
pub mod query_logger;
pub mod resolver;
pub mod root_hints;
pub mod root_probe;
pub mod transport;
pub mod wire;

pub use cache::SqliteResponseCache;
pub use query_logger::JsonFileQueryLog;
pub use resolver::{ContextHandle, IterativeResolver, ResolverContext, ResolverSettings};
pub use root_hints::RootHints;
pub use root_probe::{ProbeResult, RootProbe};
pub use transport::{DnsTransport, UdpSocketPool, UdpTransport};

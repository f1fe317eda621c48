pub mod config;
pub mod context;
mod failover;
pub mod iterative;

pub use config::ResolverSettings;
pub use context::{ContextHandle, ResolverContext};
pub use iterative::IterativeResolver;

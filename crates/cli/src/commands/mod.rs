mod cache;
mod log;
mod probe;
mod resolve;
mod run;

pub use cache::{cache, CacheAction};
pub use log::log;
pub use probe::probe;
pub use resolve::resolve;
pub use run::run;

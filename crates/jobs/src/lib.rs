pub mod cache_maintenance;
pub mod cache_reset;
pub mod root_rotation;
pub mod runner;

pub use cache_maintenance::CacheMaintenanceJob;
pub use cache_reset::CacheResetJob;
pub use root_rotation::RootRotationJob;
pub use runner::JobRunner;

use rootwalk_domain::config::CacheConfig;
use rootwalk_infrastructure::database::{create_pool, database_url};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{error, info};

pub async fn init_database(cfg: &CacheConfig) -> anyhow::Result<SqlitePool> {
    let url = database_url(&cfg.path)?;
    info!(url = %url, "Initializing cache database");

    let pool = create_pool(
        &url,
        cfg.max_connections,
        Duration::from_secs(cfg.busy_timeout_secs),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to open cache database");
        anyhow::anyhow!(e)
    })?;

    info!(max_connections = cfg.max_connections, "Cache database ready");
    Ok(pool)
}

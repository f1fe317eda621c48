use super::resolve::print_outcome;
use crate::bootstrap::init_database;
use crate::di::{DnsServices, UseCases};
use rootwalk_application::use_cases::ResolveDomainUseCase;
use rootwalk_domain::Config;
use rootwalk_jobs::{CacheMaintenanceJob, CacheResetJob, JobRunner, RootRotationJob};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const STDIN_CLIENT: &str = "stdin";

/// Starts the enabled jobs and answers lookups read from stdin, one
/// `domain [type] [class]` per line, until Ctrl-C. Lookups and root
/// rotation share one resolver context.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let pool = init_database(&config.cache).await?;
    let use_cases = UseCases::new(pool.clone());
    let dns = DnsServices::new(config).await?;
    let resolver = Arc::new(UseCases::resolve(config, &dns, pool.clone()));

    let shutdown = CancellationToken::new();
    let mut runner = JobRunner::new().with_shutdown_token(shutdown.clone());

    if config.cache.purge_interval_secs > 0 {
        runner = runner.with_cache_maintenance(
            CacheMaintenanceJob::new(use_cases.maintenance.clone())
                .with_interval(config.cache.purge_interval_secs),
        );
    }
    if config.cache.daily_reset {
        runner = runner.with_cache_reset(
            CacheResetJob::new(use_cases.maintenance.clone())
                .with_hour_utc(config.cache.reset_at_utc_hour),
        );
    }
    if config.resolver.root_reprobe_interval_secs > 0 {
        runner = runner.with_root_rotation(
            RootRotationJob::new(dns.context.clone())
                .with_interval(config.resolver.root_reprobe_interval_secs),
        );
    }

    runner.start().await;

    let lookups = tokio::spawn(serve_lines(resolver, shutdown.clone()));

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown.cancel();
    if let Err(e) = lookups.await {
        warn!(error = %e, "Lookup loop ended abnormally");
    }
    pool.close().await;

    let sockets = dns.sockets.stats();
    info!(
        sockets_created = sockets.total_created,
        sockets_reused = sockets.total_reused,
        "Shutdown complete"
    );
    Ok(())
}

async fn serve_lines(resolver: Arc<ResolveDomainUseCase>, shutdown: CancellationToken) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                let mut fields = line.split_whitespace();
                let Some(domain) = fields.next() else {
                    continue;
                };
                let record_type = fields.next().unwrap_or("A");
                let record_class = fields.next().unwrap_or("IN");

                let outcome = resolver
                    .execute_raw(domain, record_type, record_class, Some(STDIN_CLIENT))
                    .await;
                print_outcome(domain, &outcome);
            }
            Ok(None) => {
                info!("Input closed, jobs keep running");
                break;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read lookup, input loop stopped");
                break;
            }
        }
    }
}

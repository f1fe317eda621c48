use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use rootwalk_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_RESET_HOUR_UTC: u32 = 0;

/// Empties the whole response cache once a day at a fixed UTC hour.
pub struct CacheResetJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    hour_utc: u32,
    shutdown: CancellationToken,
}

impl CacheResetJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            hour_utc: DEFAULT_RESET_HOUR_UTC,
            shutdown: CancellationToken::new(),
        }
    }

    /// Hours past 23 wrap around the day.
    pub fn with_hour_utc(mut self, hour: u32) -> Self {
        self.hour_utc = hour % 24;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(hour_utc = self.hour_utc, "Starting daily cache reset job");

        tokio::spawn(async move {
            loop {
                let wait = until_next_reset(Utc::now(), self.hour_utc);
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheResetJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(wait) => {
                        match self.maintenance.run_reset().await {
                            Ok(outcome) => {
                                info!(
                                    entries_removed = outcome.entries_removed,
                                    "Daily cache reset completed"
                                );
                            }
                            Err(e) => {
                                error!(error = %e, "Daily cache reset failed");
                            }
                        }
                    }
                }
            }
        });
    }
}

/// Time left until the next `hour_utc:00:00`. A reset exactly at `now`
/// is scheduled for the following day.
pub fn until_next_reset(now: DateTime<Utc>, hour_utc: u32) -> Duration {
    let at = NaiveTime::from_hms_opt(hour_utc % 24, 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date_naive().and_time(at).and_utc();
    if next <= now {
        next += ChronoDuration::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

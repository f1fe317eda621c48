use rootwalk_application::ports::RootRotationPort;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const DEFAULT_ROTATION_INTERVAL_SECS: u64 = 3600;

/// Re-probes the root servers periodically so new resolutions start from
/// whichever root is currently nearest.
pub struct RootRotationJob {
    rotation: Arc<dyn RootRotationPort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl RootRotationJob {
    pub fn new(rotation: Arc<dyn RootRotationPort>) -> Self {
        Self {
            rotation,
            interval_secs: DEFAULT_ROTATION_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting root rotation job");

        tokio::spawn(async move {
            let period = Duration::from_secs(self.interval_secs);
            // Bootstrap already probed; the first rotation is one period out.
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("RootRotationJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.rotation.rotate().await {
                            Ok(Some(selected)) => {
                                info!(
                                    root = %selected.server,
                                    latency_ms = selected.latency.as_millis() as u64,
                                    "Root server rotated"
                                );
                            }
                            Ok(None) => {
                                warn!("No root server answered the probe, keeping current root");
                            }
                            Err(e) => {
                                error!(error = %e, "Root rotation failed");
                            }
                        }
                    }
                }
            }
        });
    }
}

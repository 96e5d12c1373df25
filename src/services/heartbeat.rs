//! Liveness heartbeat task

use std::time::Duration;

use tokio::task::JoinHandle;

const INTERVAL: Duration = Duration::from_secs(5);

/// Spawn a background task that periodically logs liveness, to help
/// diagnose unexpected shutdowns.
pub fn spawn() -> JoinHandle<()> {
    tokio::spawn(async {
        tracing::info!("Heartbeat task started");
        let mut interval = tokio::time::interval(INTERVAL);
        loop {
            interval.tick().await;
            tracing::debug!("Heartbeat: {}", chrono::Utc::now());
        }
    })
}

//! Simulated live connection status.
//!
//! There is no real connection to check. The monitor reports `connecting`,
//! switches to `connected` shortly after, and occasionally simulates a blip
//! while live mode is on.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::ConnectionStatus;
use crate::events::AppEvent;
use crate::ports::AppEventEmitter;

#[derive(Debug, Clone)]
pub struct ConnectionMonitorConfig {
    /// Time spent `connecting` after start.
    pub connect_delay: Duration,
    /// Interval between simulated health checks.
    pub check_interval: Duration,
    /// Chance (0.0-1.0) that a health check produces a blip.
    pub blip_probability: f64,
    /// Time a blip lasts before reconnecting.
    pub recovery_delay: Duration,
}

impl Default for ConnectionMonitorConfig {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_millis(500),
            check_interval: Duration::from_secs(5),
            blip_probability: 0.02,
            recovery_delay: Duration::from_secs(1),
        }
    }
}

pub struct ConnectionMonitor {
    status: watch::Receiver<ConnectionStatus>,
    task: JoinHandle<()>,
}

impl ConnectionMonitor {
    pub fn start(config: ConnectionMonitorConfig, emitter: Arc<dyn AppEventEmitter>) -> Self {
        let (tx, rx) = watch::channel(ConnectionStatus::Connecting);
        emitter.emit(AppEvent::connection_status_changed(
            ConnectionStatus::Connecting,
        ));
        let task = tokio::spawn(run(config, tx, emitter));
        Self { status: rx, task }
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }

    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    config: ConnectionMonitorConfig,
    tx: watch::Sender<ConnectionStatus>,
    emitter: Arc<dyn AppEventEmitter>,
) {
    let publish = |status: ConnectionStatus| {
        if tx.send_replace(status) != status {
            tracing::debug!(%status, "Connection status changed");
            emitter.emit(AppEvent::connection_status_changed(status));
        }
    };
    let probability = config.blip_probability.clamp(0.0, 1.0);
    let mut rng = StdRng::from_entropy();

    tokio::time::sleep(config.connect_delay).await;
    publish(ConnectionStatus::Connected);

    let start = tokio::time::Instant::now() + config.check_interval;
    let mut checks = tokio::time::interval_at(start, config.check_interval);
    loop {
        checks.tick().await;
        if rng.gen_bool(probability) {
            publish(ConnectionStatus::Connecting);
            tokio::time::sleep(config.recovery_delay).await;
            publish(ConnectionStatus::Connected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NoopEmitter;
    use crate::services::test_support::RecordingEmitter;

    #[tokio::test(start_paused = true)]
    async fn connects_after_short_delay_and_stays_up_without_blips() {
        let config = ConnectionMonitorConfig {
            blip_probability: 0.0,
            ..Default::default()
        };
        let monitor = ConnectionMonitor::start(config, Arc::new(NoopEmitter::new()));
        assert_eq!(monitor.status(), ConnectionStatus::Connecting);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(monitor.status(), ConnectionStatus::Connected);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(monitor.status(), ConnectionStatus::Connected);
        monitor.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn blips_recover_after_the_recovery_delay() {
        let emitter = Arc::new(RecordingEmitter::default());
        let config = ConnectionMonitorConfig {
            blip_probability: 1.0,
            ..Default::default()
        };
        let monitor = ConnectionMonitor::start(config, emitter.clone());

        // Connected at 0.5s, first check at 5.5s.
        tokio::time::sleep(Duration::from_millis(5_700)).await;
        assert_eq!(monitor.status(), ConnectionStatus::Connecting);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(monitor.status(), ConnectionStatus::Connected);
        assert_eq!(emitter.names().len(), 4);
    }
}

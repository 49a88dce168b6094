//! Background integrity sweep.
//!
//! While a game is active, a timer periodically audits the store and lets it
//! repair drifted totals. The sweep is a safety net for out-of-band writers;
//! it stops on `shutdown` or when the handle is dropped.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::state::game_store::GameStore;

pub struct IntegritySweep {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl IntegritySweep {
    /// Start the sweep on the current tokio runtime.
    pub fn spawn(store: Arc<GameStore>, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first audit is one period out.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !store.is_active() {
                            continue;
                        }
                        if let Some(report) = store.run_integrity_check() {
                            debug!(valid = report.is_valid, "Scheduled integrity check");
                        }
                    }
                }
            }
            debug!("Integrity sweep stopped");
        });

        info!(period_ms = period.as_millis() as u64, "Integrity sweep started");
        Self {
            cancel,
            handle: Some(handle),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the timer and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for IntegritySweep {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

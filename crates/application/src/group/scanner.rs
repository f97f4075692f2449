use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use domain::event::EventPublisher;
use domain::{GroupEvent, ScanMode};

use super::tag_group::GroupCore;

/// Periodic scan task over a group's batch read/write paths.
///
/// Ticks are serialized: each tick runs to completion inside the task's own
/// loop before the next interval starts, so a tick slower than the interval
/// delays later ticks instead of overlapping them. The interval is re-read
/// before every sleep, so an interval change takes effect at the next tick
/// boundary.
pub(crate) struct Scanner {
    core: Arc<GroupCore>,
    publisher: Arc<dyn EventPublisher>,
    cancel_token: CancellationToken,
}

impl Scanner {
    pub(crate) fn new(
        core: Arc<GroupCore>,
        publisher: Arc<dyn EventPublisher>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            core,
            publisher,
            cancel_token,
        }
    }

    /// Run until cancelled. No tick fires after cancellation is observed.
    pub(crate) async fn run(self) {
        loop {
            let interval = self.core.scan_interval();
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    tracing::info!("Scan task stopping");
                    return;
                }
                _ = tokio::time::sleep(interval) => {
                    self.tick().await;
                }
            }
        }
    }

    async fn tick(&self) {
        let mode = self.core.scan_mode();
        match mode {
            ScanMode::ReadOnly => {
                let _ = self.core.read(false).await;
            }
            ScanMode::WriteOnly => {
                let _ = self.core.write().await;
            }
            // Pass-through: the caller drives reads/writes in this mode
            ScanMode::ReadAndWrite => {}
        }

        // Fires on every tick, whether or not anything changed
        if let Err(e) = self.publisher.publish(GroupEvent::scan_completed()).await {
            tracing::warn!(error = %e, "Failed to publish scan-completed event");
        }
        tracing::debug!(mode = %mode, "Scan tick complete");
    }
}

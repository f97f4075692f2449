//! Runs a scanning tag group against the in-memory controller simulator.
//!
//! Creates two tags, starts a 200ms read-only scan and nudges the simulated
//! device so change notifications show up in the log.

use std::time::Duration;

use application::TagGroup;
use domain::{ElementType, GroupEvent, ScanMode};
use infrastructure::{ChannelEventPublisher, SimulatedController};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let controller = SimulatedController::new();
    let (publisher, mut events) = ChannelEventPublisher::unbounded();
    let group = TagGroup::new(controller.clone(), publisher);

    group.create_tag("Line1/MotorSpeed", ElementType::Int32).await?;
    group.create_tag("Line1/Label", ElementType::String).await?;

    let subscriber = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                GroupEvent::Changed { results, .. } => {
                    for result in &results {
                        tracing::info!(
                            tag = %result.tag.name(),
                            value = ?result.value(),
                            "Value changed"
                        );
                    }
                }
                GroupEvent::ScanCompleted { timestamp } => {
                    tracing::debug!(%timestamp, "Scan completed");
                }
            }
        }
    });

    group.set_scan_mode(ScanMode::ReadOnly);
    group.set_scan_interval(Duration::from_millis(200))?;
    group.scan_start().await?;

    // Steer the "device" while the scanner runs
    let speed = controller
        .simulated("Line1/MotorSpeed")
        .expect("tag was created above");
    for rpm in [900, 1200, 1180] {
        tokio::time::sleep(Duration::from_millis(500)).await;
        speed.set_remote(json!(rpm)).await;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    group.scan_stop().await;
    group.dispose().await;
    drop(group);
    subscriber.await?;

    Ok(())
}

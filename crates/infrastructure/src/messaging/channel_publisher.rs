use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use domain::GroupEvent;
use domain::event::EventPublisher;

/// Publishes group events into an in-process channel.
///
/// The receiving half is handed back at construction; whoever holds it is
/// the subscriber. Delivery stays in-line with the publishing task, the
/// channel only decouples consumption.
pub struct ChannelEventPublisher {
    tx: mpsc::UnboundedSender<GroupEvent>,
}

impl ChannelEventPublisher {
    pub fn unbounded() -> (Arc<Self>, mpsc::UnboundedReceiver<GroupEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(
        &self,
        event: GroupEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.tx
            .send(event)
            .map_err(|e| format!("event channel closed: {e}").into())
    }
}

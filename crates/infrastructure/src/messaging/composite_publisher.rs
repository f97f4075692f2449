use async_trait::async_trait;
use domain::GroupEvent;
use domain::event::EventPublisher;
use std::sync::Arc;

/// Fans every event out to a list of publishers.
///
/// A failing publisher is logged and skipped so the remaining subscribers
/// still see the event.
pub struct CompositeEventPublisher {
    publishers: Vec<Arc<dyn EventPublisher>>,
}

impl CompositeEventPublisher {
    pub fn new(publishers: Vec<Arc<dyn EventPublisher>>) -> Self {
        Self { publishers }
    }
}

#[async_trait]
impl EventPublisher for CompositeEventPublisher {
    async fn publish(
        &self,
        event: GroupEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for publisher in &self.publishers {
            if let Err(e) = publisher.publish(event.clone()).await {
                tracing::error!(error = %e, event = event.event_type(), "Failed to publish to one of the publishers");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::ChannelEventPublisher;

    #[tokio::test]
    async fn test_fan_out_continues_past_failure() {
        let (dead, dead_rx) = ChannelEventPublisher::unbounded();
        drop(dead_rx); // first publisher will fail
        let (alive, mut alive_rx) = ChannelEventPublisher::unbounded();

        let composite = CompositeEventPublisher::new(vec![dead, alive]);
        composite
            .publish(GroupEvent::scan_completed())
            .await
            .unwrap();

        assert_eq!(alive_rx.recv().await.unwrap().event_type(), "ScanCompleted");
    }
}

use crate::GroupEvent;
use async_trait::async_trait;

/// Outbound port for group notifications.
///
/// `publish` is awaited in-line by whatever task produced the event, so
/// implementations must be quick; anything slow belongs behind a channel.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: GroupEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn publish_batch(
        &self,
        events: Vec<GroupEvent>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

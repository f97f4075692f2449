use std::sync::Arc;

use domain::GroupEvent;
use domain::event::EventPublisher;
use domain::tag::ReadResult;

/// Aggregates per-tag results of a batch read into a single Changed
/// notification carrying only the results whose tag reported a change.
pub struct ChangeNotifier {
    publisher: Arc<dyn EventPublisher>,
}

impl ChangeNotifier {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Publish the Changed event for the changed subset of `results`, in
    /// their original order, and return that subset. Nothing is published
    /// when no tag changed. A publisher failure is logged and does not fail
    /// the read that triggered it.
    pub async fn notify_changed(&self, results: &[ReadResult]) -> Vec<ReadResult> {
        let changed: Vec<ReadResult> = results.iter().filter(|r| r.changed).cloned().collect();
        if !changed.is_empty() {
            if let Err(e) = self
                .publisher
                .publish(GroupEvent::changed(changed.clone()))
                .await
            {
                tracing::warn!(error = %e, "Failed to publish changed event");
            }
        }
        changed
    }
}

use chrono::{DateTime, Utc};

mod publisher;
pub use publisher::EventPublisher;

use crate::tag::ReadResult;

/// Events raised by a tag group towards its subscribers.
///
/// Delivery is in-line on the task executing the batch or the scan tick;
/// subscribers must not block the scan loop.
#[derive(Debug, Clone)]
pub enum GroupEvent {
    /// At least one member's read observed a value change. Carries only the
    /// changed subset of the batch, in membership order.
    Changed {
        results: Vec<ReadResult>,
        timestamp: DateTime<Utc>,
    },

    /// A scan tick completed, whether or not anything changed.
    ScanCompleted { timestamp: DateTime<Utc> },
}

impl GroupEvent {
    /// Create a Changed event from the changed subset of a batch read.
    pub fn changed(results: Vec<ReadResult>) -> Self {
        Self::Changed {
            results,
            timestamp: Utc::now(),
        }
    }

    /// Create a ScanCompleted event.
    pub fn scan_completed() -> Self {
        Self::ScanCompleted {
            timestamp: Utc::now(),
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Changed { .. } => "Changed",
            Self::ScanCompleted { .. } => "ScanCompleted",
        }
    }

    /// Get the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Changed { timestamp, .. } => *timestamp,
            Self::ScanCompleted { timestamp } => *timestamp,
        }
    }
}

use std::sync::Arc;

use crate::error::DomainError;

use super::TagRef;

/// Outcome of reading one member during a batch read.
#[derive(Clone)]
pub struct ReadResult {
    /// The tag this result belongs to.
    pub tag: Arc<dyn TagRef>,
    /// Decoded value on success, per-tag failure otherwise. A failure here
    /// never aborts the rest of the batch.
    pub outcome: Result<serde_json::Value, DomainError>,
    /// Whether the tag reported a value change at this read.
    pub changed: bool,
}

impl ReadResult {
    pub fn new(
        tag: Arc<dyn TagRef>,
        outcome: Result<serde_json::Value, DomainError>,
        changed: bool,
    ) -> Self {
        Self {
            tag,
            outcome,
            changed,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The decoded value, if the read succeeded.
    pub fn value(&self) -> Option<&serde_json::Value> {
        self.outcome.as_ref().ok()
    }
}

impl std::fmt::Debug for ReadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadResult")
            .field("tag", &self.tag.name())
            .field("outcome", &self.outcome)
            .field("changed", &self.changed)
            .finish()
    }
}

/// Outcome of writing one member during a batch write.
#[derive(Clone)]
pub struct WriteResult {
    pub tag: Arc<dyn TagRef>,
    pub outcome: Result<(), DomainError>,
}

impl WriteResult {
    pub fn new(tag: Arc<dyn TagRef>, outcome: Result<(), DomainError>) -> Self {
        Self { tag, outcome }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl std::fmt::Debug for WriteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteResult")
            .field("tag", &self.tag.name())
            .field("outcome", &self.outcome)
            .finish()
    }
}

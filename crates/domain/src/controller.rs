use std::sync::Arc;

use crate::error::Result;
use crate::tag::{TagRef, TagSpec};

/// The single owning connection behind a tag group.
///
/// The group-scanning engine never talks to the wire directly; it only asks
/// the controller whether a tag belongs to it, registers newly created tags
/// and delegates tag construction. Connection management, reconnection and
/// framing are entirely the implementation's concern.
pub trait Controller: Send + Sync {
    /// Whether this exact tag handle is part of the controller's registry.
    fn is_registered(&self, tag: &Arc<dyn TagRef>) -> bool;

    /// Add a newly created tag to the authoritative registry and return the
    /// same handle. Registering an already-registered tag is a no-op.
    fn register(&self, tag: Arc<dyn TagRef>) -> Arc<dyn TagRef>;

    /// Construct a new, not-yet-registered tag handle for `spec`.
    fn create_tag(&self, spec: TagSpec) -> Result<Arc<dyn TagRef>>;

    /// Snapshot of the full registry, for membership validation.
    fn tags(&self) -> Vec<Arc<dyn TagRef>>;
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;

use super::TagSpec;

/// Handle to a single addressable remote value owned by a controller.
///
/// Implementations live in the wire-protocol layer (or the in-memory
/// simulator); the group-scanning engine only drives this contract.
/// Equality between handles is pointer identity, see [`same_tag`].
#[async_trait]
pub trait TagRef: Send + Sync {
    /// Textual address of the tag in the controller's namespace.
    fn name(&self) -> &str;

    /// The spec this tag was created from.
    fn spec(&self) -> &TagSpec;

    /// Read the current remote value.
    /// Updates the change-tracking state on success.
    async fn read(&self) -> Result<serde_json::Value, DomainError>;

    /// Whether the last successful read observed a value different from the
    /// read before it. A first read always counts as changed.
    fn is_changed(&self) -> bool;

    /// Write the tag's pending value to the controller.
    async fn write(&self) -> Result<(), DomainError>;

    /// Release controller-side resources. Idempotent.
    async fn dispose(&self) -> Result<(), DomainError>;
}

/// Identity comparison for tag handles: two handles are the same tag iff
/// they point at the same allocation.
pub fn same_tag(a: &Arc<dyn TagRef>, b: &Arc<dyn TagRef>) -> bool {
    Arc::ptr_eq(a, b)
}

use serde::{Deserialize, Serialize};

use super::ElementType;

/// Value object describing a tag to be created against a controller.
///
/// `name` is the textual address of the tag in the controller's namespace
/// (e.g. `myDataStruct.rotationTimer.ACC`, `myDINTArray[42]`). No syntax
/// validation happens here: the wire-protocol collaborator owns name rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    pub name: String,
    pub element_type: ElementType,
    /// Byte size of one element. For structure tags, the total structure size.
    pub element_size: usize,
    /// Element count: 1 = scalar, >1 = array.
    pub length: usize,
}

impl TagSpec {
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        element_size: usize,
        length: usize,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            element_size,
            length,
        }
    }

    /// Scalar spec with the size derived from the element type.
    pub fn scalar(name: impl Into<String>, element_type: ElementType) -> Self {
        Self::new(name, element_type, element_type.element_size(), 1)
    }

    pub fn is_array(&self) -> bool {
        self.length > 1
    }

    /// Total byte size of the tag's data area.
    pub fn total_size(&self) -> usize {
        self.element_size * self.length
    }
}

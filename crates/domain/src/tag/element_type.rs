use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Wire element size of a CIP STRING: 4-byte length + 82 data + 2 padding.
const STRING_ELEMENT_SIZE: usize = 88;

/// Element type of a tag, keyed by an explicit enum rather than runtime
/// type introspection. Drives per-element byte size and zero-value
/// construction for the typed tag factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    String,
}

impl ElementType {
    /// Byte size of a single element of this type on the wire.
    pub fn element_size(&self) -> usize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::String => STRING_ELEMENT_SIZE,
        }
    }

    /// Zero value for this type. Text types yield the empty string, never
    /// null, so a freshly created tag always has a defined wire encoding.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => json!(false),
            Self::Int8 | Self::UInt8 | Self::Int16 | Self::UInt16 | Self::Int32 | Self::UInt32 => {
                json!(0)
            }
            Self::Float32 => json!(0.0),
            Self::String => Value::String(String::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Float32 => "float32",
            Self::String => "string",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Bool | Self::String)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

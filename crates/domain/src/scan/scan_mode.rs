use serde::{Deserialize, Serialize};

/// What a scan tick does with the group's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanMode {
    /// Each tick performs a batch read.
    ReadOnly,
    /// Each tick performs a batch write.
    WriteOnly,
    /// Pass-through: the tick performs no batch call of its own and only
    /// raises the scan-completed notification. Reads and writes are the
    /// caller's responsibility in this mode.
    ReadAndWrite,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::WriteOnly => "write-only",
            Self::ReadAndWrite => "read-and-write",
        }
    }

    /// Whether the tick itself drives a batch operation.
    pub fn drives_batch(&self) -> bool {
        !matches!(self, Self::ReadAndWrite)
    }
}

impl Default for ScanMode {
    fn default() -> Self {
        Self::ReadAndWrite
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

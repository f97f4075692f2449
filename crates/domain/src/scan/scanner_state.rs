use serde::{Deserialize, Serialize};

/// Lifecycle state of a group's periodic scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScannerState {
    /// No scan task is alive.
    Stopped,
    /// A scan task is alive and ticking.
    Running,
}

impl ScannerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl Default for ScannerState {
    fn default() -> Self {
        Self::Stopped
    }
}

impl std::fmt::Display for ScannerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Tag already exists in this group: {0}")]
    DuplicateMember(String),

    #[error("Tag is not a member of this group: {0}")]
    NotAMember(String),

    #[error("Tag is not registered with this group's controller: {0}")]
    ForeignTag(String),

    #[error("Scan start requested while the group is disabled")]
    ScanDisabled,

    #[error("Scan interval must be positive")]
    InvalidScanInterval,

    #[error("Failed to create tag: {0}")]
    TagCreation(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Group has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, DomainError>;

//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Value Objects (ElementType, TagSpec, ScanMode, ScannerState)
//! - Collaborator traits (TagRef, Controller, EventPublisher)
//! - Batch result types (ReadResult, WriteResult)
//! - Domain Events (GroupEvent)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Business rules enforced at domain level
//! - Testable in isolation

pub mod controller;
pub mod error;
pub mod event;
pub mod scan;
pub mod tag;

// Re-export commonly used types
pub use controller::Controller;
pub use error::DomainError;
pub use event::{EventPublisher, GroupEvent};
pub use scan::{ScanMode, ScannerState};
pub use tag::{ElementType, ReadResult, TagRef, TagSpec, WriteResult, same_tag};

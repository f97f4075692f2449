//! Infrastructure layer - in-process collaborator implementations
//!
//! Provides the pieces a tag group needs around it without a real PLC on
//! the wire: an in-memory controller/tag simulator and event publishers.

pub mod messaging;
pub mod simulator;

pub use messaging::{ChannelEventPublisher, CompositeEventPublisher};
pub use simulator::{SimulatedController, SimulatedTag};

//! In-memory simulation of a controller connection and its tags.
//!
//! Stands in for the wire-protocol layer in tests, examples and demos: tags
//! hold their "remote" value in memory and track changes across reads the
//! same way a protocol tag handle would.

mod controller;
mod tag;

pub use controller::SimulatedController;
pub use tag::SimulatedTag;

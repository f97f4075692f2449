//! Application layer - the group-scanning engine
//!
//! A [`TagGroup`] owns an ordered, duplicate-free set of tag handles drawn
//! from one controller, drives batch reads and writes over them, aggregates
//! per-read change detection into a single notification and runs an
//! optional periodic scanner over the same paths.

pub mod group;

pub use group::{ChangeNotifier, TagGroup};

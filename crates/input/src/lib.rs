//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key presses onto [`crate::types::GameAction`]. Each press
//! becomes exactly one action; there is no auto-repeat or throttling.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};

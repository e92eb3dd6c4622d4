//! Collaborator traits
//!
//! Implemented by the board firmware, which owns the physical outputs and
//! the active control range.

pub mod valve;

pub use valve::{NeutralOffsetStore, ValveDriver};

//! Keyboard input
//!
//! Discrete key-down/key-up events are looked up in a `KeyMap` and turned
//! into player velocity by the `InputMapper`.

mod actions;
mod mapper;

pub use actions::*;
pub use mapper::{InputMapper, InputOutcome};

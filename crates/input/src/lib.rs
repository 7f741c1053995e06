//! Terminal input module (client-facing).
//!
//! Maps `crossterm` key events into [`KeyCommand`]s through a small binding
//! table, and mouse presses into heading-based [`Action`](types::Action)s
//! measured from the last rendered local ship.

pub mod map;
pub mod pointer;

pub use skirmish_core as core;
pub use skirmish_types as types;

pub use map::{is_interrupt, KeyCommand, KeyMap};
pub use pointer::{pointer_action, pointer_event, PointerButton, PointerEvent};

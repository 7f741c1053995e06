//! TUI Skirmish (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, tests and
//! benches can use `tui_skirmish::{core,input,net,term,types}`.

pub use skirmish_core as core;
pub use skirmish_input as input;
pub use skirmish_net as net;
pub use skirmish_term as term;
pub use skirmish_types as types;

//! Terminal rendering module.
//!
//! Rendering is split in three layers:
//!
//! - [`surface`]: an immediate-mode 2D [`Surface`] (rects, rotated ellipses,
//!   aligned text) in `f64` pixel coordinates, with a terminal framebuffer
//!   backend and a recording backend
//! - [`scene_view`]: draws the scene model onto any surface
//! - [`renderer`]: flushes a framebuffer to a real terminal
//!
//! Only the last layer does I/O, so everything above it is unit-testable.

pub mod fb;
pub mod renderer;
pub mod scene_view;
pub mod surface;

pub use skirmish_core as core;
pub use skirmish_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use scene_view::{FrameSummary, Palette, SceneView};
pub use surface::{DrawList, DrawOp, Ellipse, Surface, TextAlign};

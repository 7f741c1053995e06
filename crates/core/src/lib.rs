//! Core client logic - pure, deterministic, and testable
//!
//! Everything the client knows about the world lives here, with **zero
//! dependencies** on the terminal, the network or any I/O:
//!
//! - [`geometry`]: conversions between surface pixels, grid cells and headings
//! - [`scene`]: the most recent snapshot, replaced wholesale on every frame
//! - [`state`]: the single owned client state shared by renderer and input
//!
//! # Example
//!
//! ```
//! use skirmish_core::geometry::{screen_to_world_angle, ScreenPoint, WorldPoint};
//! use skirmish_core::{ClientState, SceneModel};
//! use skirmish_types::{Identity, Ship, Snapshot};
//!
//! let mut state = ClientState::new(200.0, 200.0);
//! assert_eq!(state.cell_size, 10.0);
//!
//! let mut snap = Snapshot::default();
//! snap.identity = Identity::from("1");
//! snap.ships.insert(Identity::from("1"), Ship::at(2.0, 3.0));
//! state.scene.replace(snap);
//! assert_eq!(state.scene.current_ship().and_then(|s| s.x()), Some(2.0));
//!
//! // Click straight right of a ship at (0,0): heading 0.
//! let angle = screen_to_world_angle(ScreenPoint::new(50.0, 5.0), WorldPoint::new(0.0, 0.0), 10.0);
//! assert!(angle.abs() < 1e-12);
//! ```

pub mod geometry;
pub mod scene;
pub mod state;

pub use skirmish_types as types;

pub use geometry::{ScreenPoint, WorldPoint};
pub use scene::SceneModel;
pub use state::{ClientState, ShipAnchor};

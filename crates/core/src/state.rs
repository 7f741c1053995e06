//! Client state shared by the renderer and the input controller.
//!
//! Each field has exactly one writer:
//!
//! - `scene`: the session, on every inbound snapshot
//! - `ship_anchor`: the renderer, whenever it draws the local ship
//! - `destination`: the input controller, on secondary clicks
//! - `cell_size`: the session, on surface resize

use crate::geometry::{cell_size, WorldPoint};
use crate::scene::SceneModel;

/// Last rendered world position of the local ship.
///
/// Starts at the grid origin; it keeps its last value while the local ship is
/// missing from the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShipAnchor {
    position: WorldPoint,
    rendered: bool,
}

impl ShipAnchor {
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Whether a local ship has ever been drawn.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn update(&mut self, position: WorldPoint) {
        self.position = position;
        self.rendered = true;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub scene: SceneModel,
    pub ship_anchor: ShipAnchor,
    /// Grid cell of the last secondary click. Not consumed by any action.
    pub destination: Option<WorldPoint>,
    pub cell_size: f64,
}

impl ClientState {
    pub fn new(surface_width: f64, surface_height: f64) -> Self {
        Self {
            cell_size: cell_size(surface_width, surface_height),
            ..Self::default()
        }
    }

    pub fn resize(&mut self, surface_width: f64, surface_height: f64) {
        self.cell_size = cell_size(surface_width, surface_height);
    }
}

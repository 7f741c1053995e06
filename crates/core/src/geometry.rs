//! Geometry module - screen/world/angle conversions.
//!
//! Screen space is the drawing surface's pixel space (x right, y down).
//! World space is the logical grid, one unit per cell. Every function here is
//! pure and total over finite inputs.

use crate::types::GRID_EXTENT;

/// A point in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in world-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Side length of one grid cell in pixels for a surface of the given size.
///
/// Cells stay square: the smaller of the two axis quotients wins.
pub fn cell_size(surface_width: f64, surface_height: f64) -> f64 {
    (surface_width / GRID_EXTENT).min(surface_height / GRID_EXTENT)
}

/// Pixel position of the center of a cell coordinate.
#[inline]
pub fn world_to_screen_center(cell_coord: f64, cell_size: f64) -> f64 {
    cell_coord * cell_size + cell_size / 2.0
}

pub fn world_point_to_screen(p: WorldPoint, cell_size: f64) -> ScreenPoint {
    ScreenPoint {
        x: world_to_screen_center(p.x, cell_size),
        y: world_to_screen_center(p.y, cell_size),
    }
}

/// Heading from a reference ship to a screen point.
///
/// The offset is taken from the ship's rendered center, and the result is
/// `-atan2(dx, dy) + PI/2`, i.e. the screen-space angle measured from +x
/// towards +y. The value is not wrapped and lies in `[-PI/2, 3PI/2]`.
pub fn screen_to_world_angle(screen: ScreenPoint, origin: WorldPoint, cell_size: f64) -> f64 {
    let dx = screen.x - origin.x * cell_size - cell_size / 2.0;
    let dy = screen.y - origin.y * cell_size - cell_size / 2.0;
    -dx.atan2(dy) + std::f64::consts::FRAC_PI_2
}

/// Grid cell under a screen point (fractional).
pub fn screen_to_world_cell(screen: ScreenPoint, cell_size: f64) -> WorldPoint {
    WorldPoint {
        x: (screen.x - cell_size / 2.0) / cell_size,
        y: (screen.y - cell_size / 2.0) / cell_size,
    }
}

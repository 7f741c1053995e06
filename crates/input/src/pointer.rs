//! Pointer (mouse) events and the click-to-heading mapping.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::core::geometry::{screen_to_world_angle, screen_to_world_cell};
use crate::core::{ClientState, ScreenPoint};
use crate::types::{Action, COLUMNS_PER_PIXEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// A button press at a surface position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub button: PointerButton,
    pub at: ScreenPoint,
}

impl PointerEvent {
    pub fn new(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            button,
            at: ScreenPoint::new(x, y),
        }
    }
}

/// Surface point at the center of a terminal cell.
pub fn cell_center(column: u16, row: u16) -> ScreenPoint {
    ScreenPoint::new(
        (column as f64 + 0.5) / COLUMNS_PER_PIXEL as f64,
        row as f64 + 0.5,
    )
}

/// Convert a crossterm mouse event. Only button presses produce an event.
pub fn pointer_event(ev: &MouseEvent) -> Option<PointerEvent> {
    let button = match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerButton::Primary,
        MouseEventKind::Down(MouseButton::Right) => PointerButton::Secondary,
        MouseEventKind::Down(MouseButton::Middle) => PointerButton::Auxiliary,
        _ => return None,
    };
    Some(PointerEvent {
        button,
        at: cell_center(ev.column, ev.row),
    })
}

/// Turn a click into an action.
///
/// The heading is measured from the last rendered local ship (the grid
/// origin if none has been drawn yet). A secondary click also records the
/// clicked cell as the destination hint.
pub fn pointer_action(event: PointerEvent, state: &mut ClientState) -> Option<Action> {
    let angle = screen_to_world_angle(event.at, state.ship_anchor.position(), state.cell_size);
    match event.button {
        PointerButton::Secondary => {
            state.destination = Some(screen_to_world_cell(event.at, state.cell_size));
            Some(Action::MoveShip { angle })
        }
        PointerButton::Primary => Some(Action::AddBullet { angle }),
        PointerButton::Auxiliary => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;
    use crossterm::event::KeyModifiers;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn maps_terminal_cells_to_surface_points() {
        let ev = pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 9, 4)).unwrap();
        assert_eq!(ev.button, PointerButton::Primary);
        assert_eq!(ev.at, ScreenPoint::new(4.75, 4.5));

        let ev = pointer_event(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)).unwrap();
        assert_eq!(ev.button, PointerButton::Secondary);
    }

    #[test]
    fn ignores_moves_and_releases() {
        assert!(pointer_event(&mouse(MouseEventKind::Moved, 3, 3)).is_none());
        assert!(pointer_event(&mouse(MouseEventKind::Up(MouseButton::Left), 3, 3)).is_none());
        assert!(pointer_event(&mouse(MouseEventKind::ScrollDown, 3, 3)).is_none());
    }

    #[test]
    fn primary_fires_toward_click() {
        let mut state = ClientState::new(200.0, 200.0);
        state.ship_anchor.update(WorldPoint::new(2.0, 2.0));
        // Ship center is (25, 25); click straight below it.
        let action = pointer_action(PointerEvent::new(PointerButton::Primary, 25.0, 80.0), &mut state);
        match action {
            Some(Action::AddBullet { angle }) => assert!((angle - FRAC_PI_2).abs() < 1e-9),
            other => panic!("unexpected action: {other:?}"),
        }
        assert!(state.destination.is_none());
    }

    #[test]
    fn secondary_turns_and_records_destination() {
        let mut state = ClientState::new(200.0, 200.0);
        state.ship_anchor.update(WorldPoint::new(2.0, 2.0));
        let action = pointer_action(PointerEvent::new(PointerButton::Secondary, 5.0, 25.0), &mut state);
        match action {
            Some(Action::MoveShip { angle }) => assert!((angle - PI).abs() < 1e-9),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(state.destination, Some(WorldPoint::new(0.0, 2.0)));
    }

    #[test]
    fn auxiliary_does_nothing() {
        let mut state = ClientState::new(200.0, 200.0);
        assert_eq!(
            pointer_action(PointerEvent::new(PointerButton::Auxiliary, 1.0, 1.0), &mut state),
            None
        );
    }

    #[test]
    fn origin_defaults_to_grid_origin() {
        let mut state = ClientState::new(200.0, 200.0);
        // No ship rendered yet: origin is cell (0,0), center (5,5).
        let action = pointer_action(PointerEvent::new(PointerButton::Primary, 50.0, 5.0), &mut state);
        assert_eq!(action, Some(Action::AddBullet { angle: 0.0 }));
    }
}

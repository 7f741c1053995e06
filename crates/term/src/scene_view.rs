//! SceneView: draws the scene model onto a [`Surface`].
//!
//! Every frame is a full clear-and-redraw. The only side effect besides
//! drawing is the local-ship anchor update used by pointer aiming.

use crate::core::geometry::{world_point_to_screen, WorldPoint};
use crate::core::{ClientState, SceneModel, ShipAnchor};
use crate::fb::Rgb;
use crate::surface::{Ellipse, Surface, TextAlign};

/// Number of damage-feed lines shown when the panel is enabled.
pub const FEED_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub local_ship: Rgb,
    pub other_ship: Rgb,
    pub bullet: Rgb,
    pub overlay: Rgb,
    pub feed: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            local_ship: Rgb::GREEN,
            other_ship: Rgb::BLUE,
            bullet: Rgb::RED,
            overlay: Rgb::WHITE,
            feed: Rgb::new(200, 200, 120),
        }
    }
}

/// What one frame contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub ships: usize,
    pub bullets: usize,
    pub overlay_lines: usize,
    pub feed_lines: usize,
}

#[derive(Debug, Clone)]
pub struct SceneView {
    palette: Palette,
    /// Overlay line spacing in surface pixels.
    line_height: f64,
    show_feed: bool,
}

impl Default for SceneView {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            line_height: 1.0,
            show_feed: false,
        }
    }
}

impl SceneView {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_damage_feed(mut self, show: bool) -> Self {
        self.show_feed = show;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render using the state's scene and cell size, updating its anchor.
    pub fn render_state<S: Surface + ?Sized>(
        &self,
        state: &mut ClientState,
        surface: &mut S,
    ) -> FrameSummary {
        let ClientState {
            scene,
            ship_anchor,
            cell_size,
            ..
        } = state;
        self.render(scene, ship_anchor, *cell_size, surface)
    }

    pub fn render<S: Surface + ?Sized>(
        &self,
        scene: &SceneModel,
        anchor: &mut ShipAnchor,
        cell_size: f64,
        surface: &mut S,
    ) -> FrameSummary {
        let mut summary = FrameSummary::default();
        surface.clear();

        let side = cell_size / 2.0;
        // Ships without a numeric position get no square.
        for (id, ship) in scene.ships() {
            let Some((x, y)) = ship.position() else {
                continue;
            };
            let c = world_point_to_screen(WorldPoint::new(x, y), cell_size);
            let color = if scene.is_local(id) {
                self.palette.local_ship
            } else {
                self.palette.other_ship
            };
            surface.fill_rect(c.x - side / 2.0, c.y - side / 2.0, side, side, color);
            summary.ships += 1;
        }

        for (_, bullet) in scene.bullets() {
            let c = world_point_to_screen(WorldPoint::new(bullet.x, bullet.y), cell_size);
            let ellipse = Ellipse {
                cx: c.x,
                cy: c.y,
                rx: cell_size / 5.0,
                ry: cell_size / 8.0,
                rotation: bullet.angle,
            };
            surface.fill_ellipse(ellipse, self.palette.bullet);
            summary.bullets += 1;
        }

        if self.show_feed {
            summary.feed_lines = self.draw_feed(scene, surface);
        }

        let Some(ship) = scene.current_ship() else {
            return summary;
        };

        let (width, _) = surface.size();
        for (i, line) in ship.overlay_lines().enumerate() {
            let y = i as f64 * self.line_height;
            surface.fill_text(width, y, &line, TextAlign::End, self.palette.overlay);
            summary.overlay_lines += 1;
        }
        if let Some((x, y)) = ship.position() {
            anchor.update(WorldPoint::new(x, y));
        }

        summary
    }

    fn draw_feed<S: Surface + ?Sized>(&self, scene: &SceneModel, surface: &mut S) -> usize {
        let Some(feed) = scene.damage_feed() else {
            return 0;
        };
        let events: Vec<_> = feed.events().collect();
        let shown = &events[events.len().saturating_sub(FEED_LINES)..];

        let (_, height) = surface.size();
        let top = height - shown.len() as f64 * self.line_height;
        for (i, ev) in shown.iter().enumerate() {
            let line = format!("{} > {} {:.0}", ev.damager, ev.damaged, ev.remaining_hp);
            let y = top + i as f64 * self.line_height;
            surface.fill_text(0.0, y, &line, TextAlign::Start, self.palette.feed);
        }
        shown.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawList, DrawOp};
    use crate::types::{Bullet, BulletId, DamageFeed, Identity, Ship, Snapshot};
    use serde_json::json;

    fn scene(snapshot: Snapshot) -> SceneModel {
        let mut scene = SceneModel::new();
        scene.replace(snapshot);
        scene
    }

    #[test]
    fn frame_starts_with_clear() {
        let mut list = DrawList::new(100.0, 100.0);
        let mut anchor = ShipAnchor::default();
        SceneView::default().render(&SceneModel::new(), &mut anchor, 5.0, &mut list);
        assert_eq!(list.ops(), &[DrawOp::Clear]);
    }

    #[test]
    fn other_ships_use_the_second_color() {
        let mut snap = Snapshot {
            identity: Identity::from("1"),
            ..Snapshot::default()
        };
        snap.ships.insert(Identity::from("1"), Ship::at(0.0, 0.0));
        snap.ships.insert(Identity::from("2"), Ship::at(1.0, 0.0));

        let mut list = DrawList::new(100.0, 100.0);
        let mut anchor = ShipAnchor::default();
        let view = SceneView::default();
        view.render(&scene(snap), &mut anchor, 10.0, &mut list);

        let colors: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![view.palette().local_ship, view.palette().other_ship]);
    }

    #[test]
    fn bullets_are_rotated_ellipses() {
        let mut snap = Snapshot::default();
        snap.bullets.insert(
            BulletId::from("0"),
            Bullet {
                x: 1.0,
                y: 2.0,
                angle: 0.75,
            },
        );

        let mut list = DrawList::new(100.0, 100.0);
        let mut anchor = ShipAnchor::default();
        SceneView::default().render(&scene(snap), &mut anchor, 40.0, &mut list);

        assert_eq!(
            list.ops()[1],
            DrawOp::Ellipse {
                ellipse: Ellipse {
                    cx: 60.0,
                    cy: 100.0,
                    rx: 8.0,
                    ry: 5.0,
                    rotation: 0.75,
                },
                color: Rgb::RED,
            }
        );
    }

    #[test]
    fn overlay_lines_are_stacked_and_right_aligned() {
        let mut snap = Snapshot {
            identity: Identity::from("a"),
            ..Snapshot::default()
        };
        snap.ships.insert(
            Identity::from("a"),
            Ship::at(1.5, 2.0).with_attribute("hp", 80),
        );

        let mut list = DrawList::new(50.0, 30.0);
        let mut anchor = ShipAnchor::default();
        let summary = SceneView::default()
            .with_line_height(2.0)
            .render(&scene(snap), &mut anchor, 1.5, &mut list);

        assert_eq!(summary.overlay_lines, 3);
        let texts: Vec<_> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, y, text, align, .. } => Some((*x, *y, text.as_str(), *align)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                (50.0, 0.0, "x,1.5", TextAlign::End),
                (50.0, 2.0, "y,2", TextAlign::End),
                (50.0, 4.0, "hp,80", TextAlign::End),
            ]
        );
        assert_eq!(anchor.position(), WorldPoint::new(1.5, 2.0));
    }

    #[test]
    fn local_ship_without_position_still_gets_its_overlay() {
        let mut snap = Snapshot {
            identity: Identity::from("a"),
            ..Snapshot::default()
        };
        snap.ships.insert(
            Identity::from("a"),
            Ship::default().with_attribute("y", 3).with_attribute("hp", 10),
        );

        let mut list = DrawList::new(50.0, 30.0);
        let mut anchor = ShipAnchor::default();
        anchor.update(WorldPoint::new(4.0, 4.0));
        let summary = SceneView::default().render(&scene(snap), &mut anchor, 1.5, &mut list);

        assert_eq!(summary.ships, 0);
        assert_eq!(list.rect_count(), 0);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["y,3", "hp,10"]);
        assert_eq!(anchor.position(), WorldPoint::new(4.0, 4.0));
    }

    #[test]
    fn feed_panel_shows_latest_events_at_the_bottom() {
        let snap = Snapshot {
            damage_feed: DamageFeed(json!([[1, 2, 40.0], [3, 4, 0.0]])),
            ..Snapshot::default()
        };
        let mut list = DrawList::new(40.0, 20.0);
        let mut anchor = ShipAnchor::default();
        let summary = SceneView::default()
            .with_damage_feed(true)
            .render(&scene(snap), &mut anchor, 1.0, &mut list);

        assert_eq!(summary.feed_lines, 2);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["1 > 2 40", "3 > 4 0"]);
        assert!(matches!(list.ops().last(), Some(DrawOp::Text { y, .. }) if *y == 19.0));
    }

    #[test]
    fn feed_panel_is_off_by_default() {
        let snap = Snapshot {
            damage_feed: DamageFeed(json!([[1, 2, 40.0]])),
            ..Snapshot::default()
        };
        let mut list = DrawList::new(40.0, 20.0);
        let mut anchor = ShipAnchor::default();
        SceneView::default().render(&scene(snap), &mut anchor, 1.0, &mut list);
        assert_eq!(list.texts().count(), 0);
    }
}

//! Shared data types and constants.
//!
//! Everything here is plain data: the wire-level shapes the server streams to
//! us (snapshots of ships, bullets, map and damage feed) and the actions we
//! stream back. Nothing in this crate performs I/O or decides policy; the
//! strict/lenient decoding rules live in the `net` crate's protocol module.
//!
//! # Grid
//!
//! The world is a square grid of `GRID_EXTENT` x `GRID_EXTENT` cells. Ship
//! and bullet coordinates are floating-point cell coordinates.
//!
//! # Key bindings
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `KEY_TURN_STEP` | 0.1 | Angle sent by the turn key |
//! | `KEY_FIRE_ANGLE` | PI/2 | Angle sent by the fire key |
//!
//! # Examples
//!
//! ```
//! use skirmish_types::{Action, Identity, GRID_EXTENT};
//!
//! let action = Action::MoveShip { angle: 0.5 };
//! assert_eq!(action.angle(), 0.5);
//! assert_eq!(action.name(), "MoveShip");
//!
//! let id = Identity::from(7u64);
//! assert_eq!(id.as_str(), "7");
//!
//! assert_eq!(GRID_EXTENT, 20.0);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Logical grid extent on both axes (20x20 cells).
pub const GRID_EXTENT: f64 = 20.0;

/// Angle sent by the keyboard turn binding.
///
/// This is a small constant, not an absolute heading computed from the ship.
pub const KEY_TURN_STEP: f64 = 0.1;

/// Angle sent by the keyboard fire binding.
pub const KEY_FIRE_ANGLE: f64 = std::f64::consts::FRAC_PI_2;

/// Terminal columns per surface pixel.
///
/// Terminal glyphs are roughly twice as tall as they are wide, so one
/// surface pixel spans two columns and one row.
pub const COLUMNS_PER_PIXEL: u16 = 2;

/// Server address used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:48666";

/// A player intent sent to the server.
///
/// Serialized in serde's externally tagged form, which is exactly the shape
/// the server expects: `{"MoveShip":{"angle":0.1}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Request a heading change (radians).
    MoveShip { angle: f64 },
    /// Request firing a projectile at the given heading (radians).
    AddBullet { angle: f64 },
}

impl Action {
    pub fn angle(&self) -> f64 {
        match *self {
            Action::MoveShip { angle } | Action::AddBullet { angle } => angle,
        }
    }

    /// Variant name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveShip { .. } => "MoveShip",
            Action::AddBullet { .. } => "AddBullet",
        }
    }
}

/// Key of the locally controlled ship (and of every ship in a snapshot).
///
/// The server may send it as a string or as an integer; it is always held in
/// its string form so it compares equal to the keys of the ships object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity(String);

impl Identity {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret a JSON scalar as an identity.
    ///
    /// Strings are taken verbatim, integers (and integral floats) by their
    /// decimal form. Anything else is not an identity.
    pub fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(Self(u.to_string()))
                } else {
                    n.as_f64().and_then(integral_to_identity)
                }
            }
            _ => None,
        }
    }
}

fn integral_to_identity(f: f64) -> Option<Identity> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(Identity((f as i64).to_string()))
    } else {
        None
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for Identity {
    fn from(v: u64) -> Self {
        Self(v.to_string())
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> serde::de::Visitor<'de> for V {
            type Value = Identity;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a string or integer identity")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Identity(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Identity(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Identity(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Identity(v.to_string()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                integral_to_identity(v)
                    .ok_or_else(|| E::custom(format!("identity {v} is not an integer")))
            }
        }

        deserializer.deserialize_any(V)
    }
}

/// Key of a bullet in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletId(pub String);

impl From<&str> for BulletId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BulletId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A ship as seen in one snapshot.
///
/// Every field the server sends (position, hp, fuel, turn rate, ...) is kept
/// verbatim and in wire order. Only `x` and `y` are interpreted, and a ship
/// missing either is still kept; it just has no position.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ship {
    pub fields: IndexMap<String, Value>,
}

impl Ship {
    pub fn at(x: f64, y: f64) -> Self {
        Self::default().with_attribute("x", x).with_attribute("y", y)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn x(&self) -> Option<f64> {
        self.attribute("x")?.as_f64()
    }

    pub fn y(&self) -> Option<f64> {
        self.attribute("y")?.as_f64()
    }

    /// Grid position, if both coordinates are numeric.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.x()?, self.y()?))
    }

    /// Move the ship, keeping the coordinates' place in the field order.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.fields.insert("x".to_string(), x.into());
        self.fields.insert("y".to_string(), y.into());
    }

    /// Status lines for the local-ship overlay: every field in wire order,
    /// each rendered as `name,value`.
    pub fn overlay_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.fields
            .iter()
            .map(|(k, v)| format!("{k},{}", scalar_text(v)))
    }
}

/// Display form of an opaque attribute value (strings without quotes).
///
/// Integral floats print without a fraction (`2.0` shows as `2`).
pub fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        other => other.to_string(),
    }
}

/// A projectile as seen in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    /// Orientation in radians; only used for drawing.
    #[serde(default, deserialize_with = "lenient_angle")]
    pub angle: f64,
}

fn lenient_angle<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64().unwrap_or(0.0))
}

/// Static world geometry as sent by the server. Not interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapPayload(pub Value);

/// Recent combat events as sent by the server.
///
/// Held raw; [`DamageFeed::events`] offers a typed view of the entries that
/// have the usual `[damager, damaged, remaining_hp]` shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DamageFeed(pub Value);

/// One `[damager, damaged, remaining_hp]` entry of the damage feed.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub damager: Identity,
    pub damaged: Identity,
    pub remaining_hp: f64,
}

impl DamageFeed {
    /// Entries shaped like `[id, id, number]`; anything else is skipped.
    pub fn events(&self) -> impl Iterator<Item = DamageEvent> + '_ {
        let entries = match &self.0 {
            Value::Array(items) => items.as_slice(),
            _ => &[],
        };
        entries.iter().filter_map(|entry| match entry.as_array()?.as_slice() {
            [damager, damaged, hp, ..] => Some(DamageEvent {
                damager: Identity::from_value(damager)?,
                damaged: Identity::from_value(damaged)?,
                remaining_hp: hp.as_f64()?,
            }),
            _ => None,
        })
    }
}

/// One authoritative world description.
///
/// On the wire this is the five-element array
/// `[identity, ships, bullets, map, damage_feed]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub identity: Identity,
    pub ships: IndexMap<Identity, Ship>,
    pub bullets: IndexMap<BulletId, Bullet>,
    pub map: MapPayload,
    pub damage_feed: DamageFeed,
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (
            &self.identity,
            &self.ships,
            &self.bullets,
            &self.map,
            &self.damage_feed,
        )
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_binding_defaults() {
        assert_eq!(KEY_TURN_STEP, 0.1);
        assert_eq!(KEY_FIRE_ANGLE, 1.5707963267948966);
        assert_eq!(GRID_EXTENT, 20.0);
    }

    #[test]
    fn identity_accepts_strings_and_integers() {
        let a: Identity = serde_json::from_value(json!("5")).unwrap();
        let b: Identity = serde_json::from_value(json!(5)).unwrap();
        let c: Identity = serde_json::from_value(json!(5.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(serde_json::from_value::<Identity>(json!(5.5)).is_err());
        assert!(serde_json::from_value::<Identity>(json!(null)).is_err());
    }

    #[test]
    fn ship_keeps_fields_in_wire_order() {
        let ship: Ship =
            serde_json::from_value(json!({"hp": 10, "x": 2, "name": "ace", "y": 3.5, "fuel": 0.5}))
                .unwrap();
        assert_eq!(ship.position(), Some((2.0, 3.5)));

        let lines: Vec<_> = ship.overlay_lines().collect();
        assert_eq!(lines, vec!["hp,10", "x,2", "name,ace", "y,3.5", "fuel,0.5"]);
    }

    #[test]
    fn ship_without_coordinates_is_still_a_ship() {
        let ship: Ship = serde_json::from_value(json!({"y": 3, "hp": 10})).unwrap();
        assert_eq!(ship.x(), None);
        assert_eq!(ship.y(), Some(3.0));
        assert_eq!(ship.position(), None);
        assert_eq!(ship.overlay_lines().collect::<Vec<_>>(), vec!["y,3", "hp,10"]);

        let odd: Ship = serde_json::from_value(json!({"x": "left", "y": 0})).unwrap();
        assert_eq!(odd.position(), None);
        assert!(serde_json::from_value::<Ship>(json!("ghost")).is_err());
    }

    #[test]
    fn moved_ship_keeps_field_order() {
        let mut ship = Ship::at(1.0, 2.0).with_attribute("hp", 5);
        ship.set_position(4.5, 6.0);
        assert_eq!(
            ship.overlay_lines().collect::<Vec<_>>(),
            vec!["x,4.5", "y,6", "hp,5"]
        );
    }

    #[test]
    fn bullet_angle_is_lenient() {
        let b: Bullet = serde_json::from_value(json!({"x": 1, "y": 2})).unwrap();
        assert_eq!(b.angle, 0.0);
        let b: Bullet = serde_json::from_value(json!({"x": 1, "y": 2, "angle": "up"})).unwrap();
        assert_eq!(b.angle, 0.0);
        let b: Bullet =
            serde_json::from_value(json!({"x": 1, "y": 2, "angle": 1.25, "ttl": 0.4})).unwrap();
        assert_eq!(b.angle, 1.25);
    }

    #[test]
    fn damage_feed_events_skip_odd_entries() {
        let feed = DamageFeed(json!([[1, 2, 40.5], "noise", [3], ["4", 5, 0.0]]));
        let events: Vec<_> = feed.events().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].damager.as_str(), "1");
        assert_eq!(events[0].damaged.as_str(), "2");
        assert_eq!(events[0].remaining_hp, 40.5);
        assert_eq!(events[1].damager.as_str(), "4");
        assert_eq!(events[1].remaining_hp, 0.0);

        assert_eq!(DamageFeed(json!({})).events().count(), 0);
    }

    #[test]
    fn action_names_match_wire_tags() {
        assert_eq!(Action::MoveShip { angle: 1.0 }.name(), "MoveShip");
        assert_eq!(Action::AddBullet { angle: 2.0 }.angle(), 2.0);
    }
}

//! Scene model: the most recently decoded snapshot, held for rendering.

use indexmap::IndexMap;

use crate::types::{Bullet, BulletId, DamageFeed, Identity, MapPayload, Ship, Snapshot};

/// The client's copy of the world.
///
/// Replaced wholesale on every snapshot; nothing is merged or carried over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneModel {
    current: Option<Snapshot>,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new snapshot, dropping the previous one.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.current = Some(snapshot);
    }

    /// True until the first snapshot arrives.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|s| &s.identity)
    }

    pub fn ships(&self) -> impl Iterator<Item = (&Identity, &Ship)> {
        self.current.iter().flat_map(|s| s.ships.iter())
    }

    pub fn bullets(&self) -> impl Iterator<Item = (&BulletId, &Bullet)> {
        self.current.iter().flat_map(|s| s.bullets.iter())
    }

    pub fn ship_map(&self) -> Option<&IndexMap<Identity, Ship>> {
        self.current.as_ref().map(|s| &s.ships)
    }

    pub fn map(&self) -> Option<&MapPayload> {
        self.current.as_ref().map(|s| &s.map)
    }

    pub fn damage_feed(&self) -> Option<&DamageFeed> {
        self.current.as_ref().map(|s| &s.damage_feed)
    }

    /// The locally controlled ship, if it exists in the current snapshot.
    ///
    /// `None` is a normal state (not yet spawned, or destroyed server-side).
    pub fn current_ship(&self) -> Option<&Ship> {
        let snap = self.current.as_ref()?;
        snap.ships.get(&snap.identity)
    }

    pub fn is_local(&self, id: &Identity) -> bool {
        self.identity() == Some(id)
    }
}

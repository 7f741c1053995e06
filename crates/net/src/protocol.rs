//! Protocol module - JSON codec for actions and snapshots.
//!
//! Outbound actions are serde's externally tagged enum form. Inbound
//! snapshots are a five-element JSON array; the top-level shape is checked
//! strictly, individual ship and bullet entries are not.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::types::{Action, BulletId, DamageFeed, Identity, MapPayload, Snapshot};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame is not JSON at all.
    #[error("snapshot frame is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    /// Valid JSON, but not `[identity, ships, bullets, map, feed]`.
    #[error("snapshot frame has the wrong shape: {0}")]
    Shape(#[source] serde_json::Error),
}

/// Wire form before per-entry validation.
#[derive(Deserialize)]
struct RawSnapshot(
    Identity,
    IndexMap<String, Value>,
    IndexMap<String, Value>,
    MapPayload,
    DamageFeed,
);

/// Encode an action as one outbound text frame.
pub fn encode_action(action: &Action) -> Result<String, serde_json::Error> {
    serde_json::to_string(action)
}

/// Encode a snapshot in the server's wire shape.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(snapshot)
}

/// Decode one inbound text frame.
///
/// Ship entries are kept whatever fields they carry, as long as they are
/// objects. Bullet entries without numeric `x`/`y` are skipped. Skipped
/// entries are logged and the rest of the frame is still used.
pub fn decode_snapshot(text: &str) -> Result<Snapshot, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Syntax)?;
    let RawSnapshot(identity, ships, bullets, map, damage_feed) =
        RawSnapshot::deserialize(value).map_err(DecodeError::Shape)?;

    Ok(Snapshot {
        identity,
        ships: lenient_entries::<Identity, _>("ship", ships),
        bullets: lenient_entries::<BulletId, _>("bullet", bullets),
        map,
        damage_feed,
    })
}

fn lenient_entries<K, T>(kind: &'static str, raw: IndexMap<String, Value>) -> IndexMap<K, T>
where
    K: From<String> + Hash + Eq,
    T: DeserializeOwned,
{
    raw.into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<T>(value) {
            Ok(entry) => Some((K::from(key), entry)),
            Err(e) => {
                warn!(kind, key = %key, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

// ABOUTME: Serde helpers for explicit partial-update ("patch") payloads
// ABOUTME: Distinguishes an absent field from an explicit null for clearable optional fields

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(..)`.
///
/// Combine with `#[serde(default)]` on an `Option<Option<T>>` field:
/// absent stays `None`, `null` becomes `Some(None)`, a value becomes
/// `Some(Some(v))`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

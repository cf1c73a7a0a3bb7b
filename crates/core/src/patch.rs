//! Helpers for partial-update payloads.
//!
//! Nullable columns need three states in an update: field absent (keep),
//! `null` (clear) and a value (set). Model them as `Option<Option<T>>` with
//! `#[serde(default, deserialize_with = "patch::double_option")]`; plain serde
//! would collapse `null` into "absent".

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(..)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

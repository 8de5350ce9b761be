//! Presence-aware optional fields for partial updates.
//!
//! A plain `Option<T>` cannot tell "field not supplied" apart from "field
//! supplied as null". Update requests need both: an omitted field leaves
//! the record alone, an explicit null clears it.

use serde::{Deserialize, Deserializer};

/// Three-state update field: `None` = not supplied (keep current value),
/// `Some(None)` = supplied as null (clear), `Some(Some(v))` = set to `v`.
pub type Patch<T> = Option<Option<T>>;

/// Deserializer for [`Patch`] fields. Must be paired with
/// `#[serde(default)]` so a missing field stays `None`; a present field
/// (null or value) lands in `Some(..)`.
pub fn patch<'de, T, D>(deserializer: D) -> Result<Patch<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Apply a patch to an optional record field.
pub fn apply<T>(field: &mut Option<T>, patch: Patch<T>) {
    if let Some(value) = patch {
        *field = value;
    }
}

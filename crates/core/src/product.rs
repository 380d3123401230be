//! Product property bag.

use serde::{Deserialize, Serialize};

/// Conventionally-typed product attributes used by the catalog filters.
///
/// Keys other than `opacity`, `room` and `color` are kept in `extra` so they
/// survive a read/serialize round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A room is usually a single string but may be a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomValue {
    One(String),
    Many(Vec<String>),
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Before/after pair for a single field.
///
/// `None` means the side was absent or null in its snapshot. Invariant:
/// at least one side is `Some` for every pair stored in a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
}

impl FieldChange {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Raw change set: field name → before/after pair, restricted to fields the
/// target type tracks.
pub type ChangeSet = BTreeMap<String, FieldChange>;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A concrete from → to pair. Both sides present, unlike
/// [`FieldChange`](super::FieldChange).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePair {
    pub from: Value,
    pub to: Value,
}

/// Element-level difference of an array-valued field, by element equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayDelta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<Value>,
}

/// Difference of a nested collection of records identified by an internal id.
///
/// A record whose id survives but whose content changed is reported in
/// `modify`, never as a remove+add pair; records consumed by a modify
/// pairing are excluded from `add`/`remove`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedDelta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modify: Vec<ValuePair>,
}

impl EmbeddedDelta {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.modify.is_empty()
    }
}

/// Classification of a change set into human-readable buckets.
///
/// Invariant: a field appears in exactly one bucket; fields blank on both
/// sides are excluded before classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditSummary {
    /// Fields whose previous value was blank.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub add: BTreeMap<String, Value>,
    /// Fields whose new value is blank.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub remove: BTreeMap<String, Value>,
    /// Scalar or equal-typed changes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modify: BTreeMap<String, ValuePair>,
    /// Array-valued fields, as element set differences.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub array: BTreeMap<String, ArrayDelta>,
    /// Nested-collection fields.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub embeds_many: BTreeMap<String, EmbeddedDelta>,
}

impl EditSummary {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty()
            && self.remove.is_empty()
            && self.modify.is_empty()
            && self.array.is_empty()
            && self.embeds_many.is_empty()
    }

    /// Number of classified fields across all buckets.
    pub fn len(&self) -> usize {
        self.add.len()
            + self.remove.len()
            + self.modify.len()
            + self.array.len()
            + self.embeds_many.len()
    }
}

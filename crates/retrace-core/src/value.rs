//! Blankness semantics for snapshot values.
//!
//! Snapshots are open key/value maps where an absent key, `null`, `""`,
//! `[]`, and `{}` all collapse to "no value" for add/remove classification.
//! Absence and `null` stay distinct everywhere else (three-valued: absent,
//! null, value).

use serde_json::Value;

/// A value is blank when it carries no usable content: null, an empty
/// string, an empty array, or an empty object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Blankness over an optional value. An absent key is blank.
pub fn is_blank_opt(value: Option<&Value>) -> bool {
    value.map_or(true, is_blank)
}

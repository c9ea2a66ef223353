//! Attribute computation for update replays.

use serde_json::Value;

use retrace_core::models::Attributes;

use crate::view::RecordView;

/// Attributes that revert the record's change.
///
/// Starts from the affected values, unmerges every key of `modified`
/// (additions revert first), overlays `original` (previous values win), sets
/// the modifier field, then explicitly nulls any `modified` key with no
/// prior value so added fields are cleared. Keys localize last.
pub fn undo_attributes(view: &RecordView<'_>, modifier: Option<&Value>) -> Attributes {
    let record = view.record();
    let mut attrs = view.affected_values();

    for key in record.modified.keys() {
        attrs.remove(key);
    }
    for (key, value) in &record.original {
        attrs.insert(key.clone(), value.clone());
    }
    attrs.insert(
        view.modifier_field(),
        modifier.cloned().unwrap_or(Value::Null),
    );
    for key in record.modified.keys() {
        if !attrs.contains_key(key) {
            attrs.insert(key.clone(), Value::Null);
        }
    }

    view.localize(attrs)
}

/// Attributes that reapply the record's change: the mirror image of
/// [`undo_attributes`], unmerging `original` and overlaying `modified`.
pub fn redo_attributes(view: &RecordView<'_>, modifier: Option<&Value>) -> Attributes {
    let record = view.record();
    let mut attrs = view.affected_values();

    for key in record.original.keys() {
        attrs.remove(key);
    }
    for (key, value) in &record.modified {
        attrs.insert(key.clone(), value.clone());
    }
    attrs.insert(
        view.modifier_field(),
        modifier.cloned().unwrap_or(Value::Null),
    );

    view.localize(attrs)
}

use std::collections::BTreeSet;

use retrace_core::models::{Attributes, ChangeSet, FieldChange};
use retrace_core::traits::ITypeMetadata;

/// Compute the raw change set from before/after snapshots.
///
/// Union of both snapshots' keys, restricted to fields the target type
/// tracks. Null and absent sides are both dropped; a pair with neither side
/// left is excluded entirely, so no entry ever has both sides `None`.
pub fn change_set(
    original: &Attributes,
    modified: &Attributes,
    metadata: &dyn ITypeMetadata,
    target_type: &str,
) -> ChangeSet {
    let keys: BTreeSet<&str> = original
        .keys()
        .chain(modified.keys())
        .map(String::as_str)
        .collect();

    let mut changes = ChangeSet::new();
    for key in keys {
        if !metadata.is_tracked(target_type, key) {
            continue;
        }
        let change = FieldChange {
            from: original.get(key).filter(|v| !v.is_null()).cloned(),
            to: modified.get(key).filter(|v| !v.is_null()).cloned(),
        };
        if change.is_empty() {
            continue;
        }
        changes.insert(key.to_string(), change);
    }
    changes
}

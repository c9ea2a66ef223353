//! Key localization for types with locale-qualified field storage.

use retrace_core::models::Attributes;
use retrace_core::traits::ITypeMetadata;
use retrace_core::value::is_blank;

/// Rewrite field keys the root type declares as locale-qualified to their
/// suffixed storage form. A key is renamed only when present with a
/// non-blank value; every other key passes through untouched. No-op for
/// types without localized fields.
///
/// Callers run this as the last step before handing attributes to the
/// store's mutation or creation entry points, so downstream collaborators
/// never see bare keys for localized fields.
pub fn localize_keys(
    mut attrs: Attributes,
    metadata: &dyn ITypeMetadata,
    root_type: &str,
    suffix: &str,
) -> Attributes {
    let localized = metadata.localized_fields(root_type);
    if localized.is_empty() {
        return attrs;
    }

    for field in localized {
        let present = attrs.get(&field).map_or(false, |value| !is_blank(value));
        if !present {
            continue;
        }
        if let Some(value) = attrs.remove(&field) {
            attrs.insert(format!("{field}{suffix}"), value);
        }
    }
    attrs
}

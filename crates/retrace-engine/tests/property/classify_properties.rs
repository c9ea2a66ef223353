//! Property tests for classification and attribute reconstruction.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use retrace_core::config::HistoryConfig;
use retrace_core::value::is_blank_opt;
use retrace_engine::classify::{change_set, edit_summary};
use retrace_engine::view::RecordView;
use test_fixtures::{ChangeRecordBuilder, SchemaRegistry, TypeSchema};

fn registry() -> SchemaRegistry {
    SchemaRegistry::new().register("Doc", TypeSchema::new().tracks_all())
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        "[a-z]{1,4}".prop_map(Value::from),
        any::<i16>().prop_map(|n| json!(n)),
        prop::collection::vec("[a-z]{1,3}".prop_map(Value::from), 0..3)
            .prop_map(Value::from),
    ]
}

fn attrs_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(
        prop::sample::select(vec!["alpha", "beta", "gamma", "delta"])
            .prop_map(str::to_string),
        value_strategy(),
        0..4,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

/// Mirror of the store's write semantics: null clears, anything else sets.
fn apply_to(doc: &mut Map<String, Value>, attrs: Map<String, Value>) {
    for (key, value) in attrs {
        if value.is_null() {
            doc.remove(&key);
        } else {
            doc.insert(key, value);
        }
    }
}

// =============================================================================
// Change sets never hold an empty pair
// =============================================================================
proptest! {
    #[test]
    fn change_set_has_no_empty_pairs(
        original in attrs_strategy(),
        modified in attrs_strategy()
    ) {
        let registry = registry();
        let changes = change_set(&original, &modified, &registry, "Doc");
        for (key, change) in &changes {
            prop_assert!(
                change.from.is_some() || change.to.is_some(),
                "field `{key}` has neither side"
            );
        }
    }
}

// =============================================================================
// Every classified field lands in exactly one bucket
// =============================================================================
proptest! {
    #[test]
    fn edit_buckets_are_disjoint(
        original in attrs_strategy(),
        modified in attrs_strategy()
    ) {
        let registry = registry();
        let config = HistoryConfig::default();
        let changes = change_set(&original, &modified, &registry, "Doc");
        let edits = edit_summary(&changes, &registry, "Doc", &config);

        let mut seen = std::collections::BTreeSet::new();
        let keys = edits
            .add
            .keys()
            .chain(edits.remove.keys())
            .chain(edits.modify.keys())
            .chain(edits.array.keys())
            .chain(edits.embeds_many.keys());
        for key in keys {
            prop_assert!(seen.insert(key.clone()), "field `{key}` in two buckets");
            prop_assert!(changes.contains_key(key), "field `{key}` not in change set");
        }

        // Fields blank on both sides never surface.
        for (key, change) in &changes {
            let both_blank = is_blank_opt(change.from.as_ref())
                && is_blank_opt(change.to.as_ref());
            if both_blank {
                prop_assert!(!seen.contains(key), "blank field `{key}` classified");
            }
        }
    }
}

// =============================================================================
// Classification is a pure function of its inputs
// =============================================================================
proptest! {
    #[test]
    fn classification_is_idempotent(
        original in attrs_strategy(),
        modified in attrs_strategy()
    ) {
        let registry = registry();
        let config = HistoryConfig::default();

        let first = edit_summary(
            &change_set(&original, &modified, &registry, "Doc"),
            &registry,
            "Doc",
            &config,
        );
        let second = edit_summary(
            &change_set(&original, &modified, &registry, "Doc"),
            &registry,
            "Doc",
            &config,
        );
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Redo-then-undo restores the original snapshot's values
// =============================================================================
proptest! {
    #[test]
    fn redo_then_undo_restores_the_original_snapshot(
        base in attrs_strategy(),
        original in attrs_strategy(),
        modified in attrs_strategy()
    ) {
        let registry = registry();
        let config = HistoryConfig::default();
        let record = ChangeRecordBuilder::update()
            .root("Doc", 1)
            .original(Value::Object(original.clone()))
            .modified(Value::Object(modified.clone()))
            .build();
        let view = RecordView::new(&record, &registry, &config).expect("valid record");

        let mut doc = base;
        apply_to(&mut doc, view.redo_attributes(None));
        apply_to(&mut doc, view.undo_attributes(None));

        for (key, value) in &original {
            if value.is_null() {
                prop_assert!(!doc.contains_key(key), "null field `{key}` survived");
            } else {
                prop_assert_eq!(doc.get(key), Some(value), "field `{}` not restored", key);
            }
        }
        for key in modified.keys() {
            if !original.contains_key(key) {
                prop_assert!(!doc.contains_key(key), "added field `{key}` not cleared");
            }
        }
    }
}

use serde_json::Value;

use retrace_core::models::{EmbeddedDelta, ValuePair};

/// Compute the delta of a nested collection of records carrying an internal
/// id under `id_field`. Missing sides default to empty sequences.
///
/// Ids present on both sides pair their records; pairs that differ
/// element-wise form `modify`. Records consumed by a modify pairing are
/// excluded from `add`/`remove`, so a record with an unchanged id but
/// changed content is never double-counted as a remove+add.
pub fn embedded_delta(from: Option<&Value>, to: Option<&Value>, id_field: &str) -> EmbeddedDelta {
    let from = records_of(from);
    let to = records_of(to);

    let mut matched_ids: Vec<&Value> = Vec::new();
    for id in from.iter().filter_map(|r| non_null_id(r, id_field)) {
        if matched_ids.contains(&id) {
            continue;
        }
        if to.iter().any(|r| non_null_id(r, id_field) == Some(id)) {
            matched_ids.push(id);
        }
    }

    let mut modify = Vec::new();
    for id in matched_ids {
        let before = from.iter().find(|r| non_null_id(r, id_field) == Some(id));
        let after = to.iter().find(|r| non_null_id(r, id_field) == Some(id));
        if let (Some(before), Some(after)) = (before, after) {
            if before != after {
                modify.push(ValuePair {
                    from: (*before).clone(),
                    to: (*after).clone(),
                });
            }
        }
    }

    let consumed = |record: &Value| {
        modify
            .iter()
            .any(|pair| pair.from == *record || pair.to == *record)
    };
    let remove = from
        .iter()
        .filter(|record| !to.contains(record) && !consumed(record))
        .cloned()
        .collect();
    let add = to
        .iter()
        .filter(|record| !from.contains(record) && !consumed(record))
        .cloned()
        .collect();

    EmbeddedDelta {
        add,
        remove,
        modify,
    }
}

fn records_of(side: Option<&Value>) -> Vec<Value> {
    match side {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

fn non_null_id<'a>(record: &'a Value, id_field: &str) -> Option<&'a Value> {
    record.get(id_field).filter(|id| !id.is_null())
}

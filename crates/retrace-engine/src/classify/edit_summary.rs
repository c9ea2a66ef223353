use serde_json::Value;

use retrace_core::config::HistoryConfig;
use retrace_core::models::{ArrayDelta, ChangeSet, EditSummary, ValuePair};
use retrace_core::traits::ITypeMetadata;
use retrace_core::value::is_blank_opt;

use super::embedded::embedded_delta;

/// Classify a change set into edit buckets.
///
/// Fields blank on both sides are excluded entirely. Every surviving field
/// lands in exactly one bucket: nested-collection fields run the embedded
/// delta, blank `from` is an add, blank `to` is a remove, two sequences form
/// an array delta, anything else is a modify.
pub fn edit_summary(
    changes: &ChangeSet,
    metadata: &dyn ITypeMetadata,
    target_type: &str,
    config: &HistoryConfig,
) -> EditSummary {
    let mut summary = EditSummary::default();

    for (key, change) in changes {
        let from = change.from.as_ref();
        let to = change.to.as_ref();
        if is_blank_opt(from) && is_blank_opt(to) {
            continue;
        }

        if metadata.is_embeds_many(target_type, key) {
            let delta = embedded_delta(from, to, &config.id_field);
            if !delta.is_empty() {
                summary.embeds_many.insert(key.clone(), delta);
            }
            continue;
        }

        match (from, to) {
            (from, Some(to)) if is_blank_opt(from) => {
                summary.add.insert(key.clone(), to.clone());
            }
            (Some(from), to) if is_blank_opt(to) => {
                summary.remove.insert(key.clone(), from.clone());
            }
            (Some(Value::Array(from)), Some(Value::Array(to))) => {
                summary.array.insert(key.clone(), array_delta(from, to));
            }
            (Some(from), Some(to)) => {
                summary.modify.insert(
                    key.clone(),
                    ValuePair {
                        from: from.clone(),
                        to: to.clone(),
                    },
                );
            }
            // A side that is absent is blank, so the guards above already
            // covered every remaining combination.
            (None, _) | (_, None) => {}
        }
    }

    summary
}

/// Element set difference in each direction, preserving order and duplicate
/// elements of the kept side.
fn array_delta(from: &[Value], to: &[Value]) -> ArrayDelta {
    ArrayDelta {
        add: difference(to, from),
        remove: difference(from, to),
    }
}

fn difference(left: &[Value], right: &[Value]) -> Vec<Value> {
    left.iter()
        .filter(|item| !right.contains(item))
        .cloned()
        .collect()
}

//! Association-chain resolution against the live document tree.

use tracing::debug;

use retrace_core::errors::{HistoryError, HistoryResult};
use retrace_core::models::ChainStep;
use retrace_core::traits::{DocumentNode, EmbedKind, IDocumentStore, ITypeMetadata};

/// Resolve an ordered chain of steps to the sequence of live documents from
/// root aggregate to target.
///
/// The root lookup and every to-many element lookup bypass default
/// scoping (the store trait's contract), so soft-deleted documents resolve
/// too. The head of the returned sequence is the root aggregate, the tail is
/// the changed document; the second-to-last element (if any) is the parent
/// used for structural recreation.
pub fn resolve_chain<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    steps: &[ChainStep],
) -> HistoryResult<Vec<S::Doc>> {
    let Some((root, rest)) = steps.split_first() else {
        return Err(HistoryError::MalformedRecord {
            reason: "association chain is empty".to_string(),
        });
    };

    let root_id = root
        .id
        .as_ref()
        .ok_or_else(|| HistoryError::MalformedRecord {
            reason: format!("root step `{}` has no id", root.name),
        })?;
    let mut current = store
        .find_root(&root.name, root_id)?
        .ok_or_else(|| HistoryError::RootNotFound {
            type_name: root.name.clone(),
            id: root_id.clone(),
        })?;
    debug!(root = %root.name, steps = steps.len(), "resolving association chain");

    let mut current_type = current.type_name().to_string();
    let mut documents = Vec::with_capacity(steps.len());
    documents.push(current.clone());

    for step in rest {
        let next = match metadata.embed_kind(&current_type, &step.name) {
            Some(EmbedKind::One) => store.embedded_one(&current, &step.name)?,
            Some(EmbedKind::Many) => {
                let id = step
                    .id
                    .as_ref()
                    .ok_or_else(|| HistoryError::MalformedRecord {
                        reason: format!("to-many step `{}` has no id", step.name),
                    })?;
                store.embedded_many(&current, &step.name, id)?
            }
            None => {
                return Err(HistoryError::ContractViolation {
                    type_name: current_type,
                    relation: step.name.clone(),
                })
            }
        };
        let next = next.ok_or_else(|| HistoryError::EmbeddedNotFound {
            relation: step.name.clone(),
            id: step.id.clone(),
        })?;

        current_type = next.type_name().to_string();
        documents.push(next.clone());
        current = next;
    }

    Ok(documents)
}

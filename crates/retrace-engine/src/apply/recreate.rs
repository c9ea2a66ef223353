//! Structural replays: re-create a destroyed document, re-destroy a created
//! one.

use tracing::debug;

use retrace_core::config::HistoryConfig;
use retrace_core::errors::{HistoryError, HistoryResult};
use retrace_core::models::ChangeRecord;
use retrace_core::traits::{DocumentNode, EmbedKind, IDocumentStore, ITypeMetadata};

use crate::localize::localize_keys;
use crate::resolve::resolve_chain;

/// Bring the record's document back into existence from its `original`
/// snapshot: under its resolved parent when the chain has nested steps,
/// as a standalone root otherwise.
pub fn re_create<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    config: &HistoryConfig,
    record: &ChangeRecord,
) -> HistoryResult<S::Doc> {
    if record.is_root_only() {
        create_standalone(store, metadata, config, record)
    } else {
        create_on_parent(store, metadata, config, record)
    }
}

/// Resolve the full chain and delete the target document. No attribute
/// mutation occurs on this path.
pub fn re_destroy<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    record: &ChangeRecord,
) -> HistoryResult<()> {
    let documents = resolve_chain(store, metadata, &record.association_chain)?;
    let target = documents
        .last()
        .ok_or_else(|| HistoryError::MalformedRecord {
            reason: "association chain is empty".to_string(),
        })?;
    store.destroy(target)
}

fn create_on_parent<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    config: &HistoryConfig,
    record: &ChangeRecord,
) -> HistoryResult<S::Doc> {
    let chain = &record.association_chain;
    let leaf = record.leaf_step()?;
    let root_type = &record.root_step()?.name;

    let mut parents = resolve_chain(store, metadata, &chain[..chain.len() - 1])?;
    let parent = parents.pop().ok_or_else(|| HistoryError::MalformedRecord {
        reason: "association chain has no parent steps".to_string(),
    })?;

    let payload = localize_keys(
        record.original.clone(),
        metadata,
        root_type,
        &config.locale_suffix,
    );
    debug!(relation = %leaf.name, parent = %parent.type_name(), "re-creating embedded document");

    match metadata.embed_kind(parent.type_name(), &leaf.name) {
        Some(EmbedKind::One) => store.create_embedded_one(&parent, &leaf.name, payload),
        Some(EmbedKind::Many) => store.append_embedded_many(&parent, &leaf.name, payload),
        None => Err(HistoryError::ContractViolation {
            type_name: parent.type_name().to_string(),
            relation: leaf.name.clone(),
        }),
    }
}

fn create_standalone<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    config: &HistoryConfig,
    record: &ChangeRecord,
) -> HistoryResult<S::Doc> {
    let root = record.root_step()?;

    // The restored document keeps its historical id.
    let id = record
        .original
        .get(&config.id_field)
        .cloned()
        .ok_or_else(|| HistoryError::MalformedRecord {
            reason: format!(
                "original snapshot has no `{}` for standalone re-create",
                config.id_field
            ),
        })?;

    let mut payload = localize_keys(
        record.original.clone(),
        metadata,
        &root.name,
        &config.locale_suffix,
    );
    payload.insert(config.id_field.clone(), id);
    debug!(type_name = %root.name, "re-creating root document");

    store.create_root(&root.name, payload)
}

//! Undo/redo reconstruction against the live document tree.
//!
//! Dispatch over `(action, direction)` is a single exhaustive match:
//! structural changes (create/destroy) replay as re-creates or re-destroys,
//! updates replay as attribute mutations. Either the whole operation
//! succeeds or it fails as a unit; store failures propagate unchanged.

pub mod attrs;
pub mod recreate;

use serde_json::Value;
use tracing::info;

use retrace_core::config::HistoryConfig;
use retrace_core::errors::{HistoryError, HistoryResult};
use retrace_core::models::{Action, ChangeRecord};
use retrace_core::traits::{IDocumentStore, ITypeMetadata};

use crate::resolve::resolve_chain;
use crate::view::RecordView;

/// Which way a change record is being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

/// Replay one change record in the given direction.
///
/// Undoing a destroy and redoing a create both re-create the document;
/// undoing a create and redoing a destroy both re-destroy it. Updates
/// mutate the resolved target's attributes in place.
pub fn apply<S: IDocumentStore>(
    store: &S,
    metadata: &dyn ITypeMetadata,
    config: &HistoryConfig,
    record: &ChangeRecord,
    direction: Direction,
    modifier: Option<&Value>,
) -> HistoryResult<()> {
    match (record.action, direction) {
        (Action::Destroy, Direction::Undo) | (Action::Create, Direction::Redo) => {
            recreate::re_create(store, metadata, config, record)?;
        }
        (Action::Create, Direction::Undo) | (Action::Destroy, Direction::Redo) => {
            recreate::re_destroy(store, metadata, record)?;
        }
        (Action::Update, Direction::Undo) | (Action::Update, Direction::Redo) => {
            let view = RecordView::new(record, metadata, config)?;
            let payload = match direction {
                Direction::Undo => attrs::undo_attributes(&view, modifier),
                Direction::Redo => attrs::redo_attributes(&view, modifier),
            };
            let documents = resolve_chain(store, metadata, &record.association_chain)?;
            let target = documents
                .last()
                .ok_or_else(|| HistoryError::MalformedRecord {
                    reason: "association chain is empty".to_string(),
                })?;
            store.mutate_attributes(target, payload)?;
        }
    }

    info!(
        action = ?record.action,
        direction = ?direction,
        version = record.version,
        "change record replayed"
    );
    Ok(())
}

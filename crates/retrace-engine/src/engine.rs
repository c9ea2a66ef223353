//! HistoryEngine — the public entry point over one store and one schema.

use serde_json::Value;
use tracing::debug;

use retrace_core::config::HistoryConfig;
use retrace_core::errors::HistoryResult;
use retrace_core::models::{ChangeRecord, ChangeSet, EditSummary};
use retrace_core::traits::{IDocumentStore, ITypeMetadata};

use crate::apply::{self, Direction};
use crate::resolve::resolve_chain;
use crate::view::RecordView;

/// The audit/history engine.
///
/// Holds references to the live document store and the per-type schema
/// metadata; owns its configuration. All operations are synchronous and
/// read one immutable change record at a time — there is no cross-record
/// shared mutable state, and any concurrency discipline (for example
/// at-most-one-undo-per-record) is the caller's responsibility.
pub struct HistoryEngine<'a, S: IDocumentStore> {
    store: &'a S,
    metadata: &'a dyn ITypeMetadata,
    config: HistoryConfig,
}

impl<'a, S: IDocumentStore> HistoryEngine<'a, S> {
    pub fn new(store: &'a S, metadata: &'a dyn ITypeMetadata) -> Self {
        Self {
            store,
            metadata,
            config: HistoryConfig::default(),
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the memoized view of a record (validates the chain and resolves
    /// the target type).
    pub fn view(&'a self, record: &'a ChangeRecord) -> HistoryResult<RecordView<'a>> {
        RecordView::new(record, self.metadata, &self.config)
    }

    /// The record's raw change set, restricted to tracked fields.
    pub fn tracked_changes(&self, record: &ChangeRecord) -> HistoryResult<ChangeSet> {
        let view = RecordView::new(record, self.metadata, &self.config)?;
        Ok(view.tracked_changes().clone())
    }

    /// Classify the record's change set into edit buckets.
    pub fn classify(&self, record: &ChangeRecord) -> HistoryResult<EditSummary> {
        let view = RecordView::new(record, self.metadata, &self.config)?;
        let edits = view.tracked_edits().clone();
        debug!(fields = edits.len(), "classified change record");
        Ok(edits)
    }

    /// Resolve the record's association chain to the live documents it
    /// addresses, root first.
    pub fn resolve(&self, record: &ChangeRecord) -> HistoryResult<Vec<S::Doc>> {
        resolve_chain(self.store, self.metadata, &record.association_chain)
    }

    /// Reverse the record's change on the live document tree.
    pub fn undo(&self, record: &ChangeRecord, modifier: Option<&Value>) -> HistoryResult<()> {
        apply::apply(
            self.store,
            self.metadata,
            &self.config,
            record,
            Direction::Undo,
            modifier,
        )
    }

    /// Reapply the record's change on the live document tree.
    pub fn redo(&self, record: &ChangeRecord, modifier: Option<&Value>) -> HistoryResult<()> {
        apply::apply(
            self.store,
            self.metadata,
            &self.config,
            record,
            Direction::Redo,
            modifier,
        )
    }
}

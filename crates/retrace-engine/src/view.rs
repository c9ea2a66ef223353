//! Memoized per-record view over a change record.

use std::cell::OnceCell;

use serde_json::Value;

use retrace_core::config::HistoryConfig;
use retrace_core::errors::{HistoryError, HistoryResult};
use retrace_core::models::{Action, Attributes, ChangeRecord, ChangeSet, EditSummary};
use retrace_core::traits::ITypeMetadata;

use crate::classify;
use crate::localize::localize_keys;

/// Read-only view of one [`ChangeRecord`] with lazily-computed, cached
/// derivations.
///
/// Each derived structure (change set, edit summary) is computed at most
/// once per view and cached for the view's lifetime; constructing a new view
/// is the only way to recompute. The record itself is never mutated.
pub struct RecordView<'a> {
    record: &'a ChangeRecord,
    metadata: &'a dyn ITypeMetadata,
    config: &'a HistoryConfig,
    root_type: String,
    target_type: String,
    changes: OnceCell<ChangeSet>,
    edits: OnceCell<EditSummary>,
}

impl<'a> RecordView<'a> {
    /// Build a view, validating the chain and resolving the target type by
    /// walking the declared relations.
    ///
    /// Fails with `MalformedRecord` on an empty chain and with
    /// `ContractViolation` when a step names an unknown relation.
    pub fn new(
        record: &'a ChangeRecord,
        metadata: &'a dyn ITypeMetadata,
        config: &'a HistoryConfig,
    ) -> HistoryResult<Self> {
        let root_type = record.root_step()?.name.clone();

        let mut target_type = root_type.clone();
        for step in &record.association_chain[1..] {
            target_type = match metadata.related_type(&target_type, &step.name) {
                Some(related) => related,
                None => {
                    return Err(HistoryError::ContractViolation {
                        type_name: target_type,
                        relation: step.name.clone(),
                    })
                }
            };
        }

        Ok(Self {
            record,
            metadata,
            config,
            root_type,
            target_type,
            changes: OnceCell::new(),
            edits: OnceCell::new(),
        })
    }

    pub fn record(&self) -> &ChangeRecord {
        self.record
    }

    /// Type of the root aggregate (first chain step).
    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// Type of the changed document itself (last chain step).
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// The raw change set, restricted to tracked fields.
    pub fn tracked_changes(&self) -> &ChangeSet {
        self.changes.get_or_init(|| {
            classify::change_set(
                &self.record.original,
                &self.record.modified,
                self.metadata,
                &self.target_type,
            )
        })
    }

    /// The classified edit summary.
    pub fn tracked_edits(&self) -> &EditSummary {
        self.edits.get_or_init(|| {
            classify::edit_summary(
                self.tracked_changes(),
                self.metadata,
                &self.target_type,
                self.config,
            )
        })
    }

    /// The values the change touched: the after-snapshot for create/update,
    /// the before-snapshot for destroy.
    pub fn affected_values(&self) -> Attributes {
        match self.record.action {
            Action::Create | Action::Update => self.record.modified.clone(),
            Action::Destroy => self.record.original.clone(),
        }
    }

    /// The target type's modifier field name.
    pub fn modifier_field(&self) -> String {
        self.metadata.modifier_field(&self.target_type)
    }

    /// Localize attribute keys for the root type. Runs as the last step of
    /// every attribute computation.
    pub fn localize(&self, attrs: Attributes) -> Attributes {
        localize_keys(
            attrs,
            self.metadata,
            &self.root_type,
            &self.config.locale_suffix,
        )
    }

    /// Attributes that revert this record's change on the live document.
    pub fn undo_attributes(&self, modifier: Option<&Value>) -> Attributes {
        crate::apply::attrs::undo_attributes(self, modifier)
    }

    /// Attributes that reapply this record's change on the live document.
    pub fn redo_attributes(&self, modifier: Option<&Value>) -> Attributes {
        crate::apply::attrs::redo_attributes(self, modifier)
    }
}

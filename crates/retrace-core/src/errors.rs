//! Error taxonomy for resolution, classification, and undo/redo.
//!
//! Every failure propagates synchronously to the caller. The engine never
//! retries, never applies a partial write, and never swallows a failure.

use serde_json::Value;

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Failures surfaced by the engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// A chain step names a relation that is neither to-one nor to-many
    /// embedded. Signals a mismatch between the declared schema and the
    /// stored chain; never recovered automatically.
    #[error("modeling contract violation: relation `{relation}` on `{type_name}` is not an embedded relation")]
    ContractViolation { type_name: String, relation: String },

    /// The chain's root document does not exist (deleted concurrently, bad id).
    #[error("root document `{type_name}` with id {id} not found")]
    RootNotFound { type_name: String, id: Value },

    /// A nested chain step resolved to no document.
    #[error("embedded document not found under relation `{relation}` (id: {id:?})")]
    EmbeddedNotFound { relation: String, id: Option<Value> },

    /// The document store rejected a write (validation, constraint).
    #[error("mutation rejected by document store: {reason}")]
    MutationRejected { reason: String },

    /// The record cannot support the requested reconstruction: empty chain,
    /// or a snapshot missing keys the declared action requires.
    #[error("malformed change record: {reason}")]
    MalformedRecord { reason: String },
}

//! # retrace-core
//!
//! Foundation crate for the retrace audit/history engine.
//! Defines the change-record models, collaborator traits, errors, config,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use config::HistoryConfig;
pub use errors::{HistoryError, HistoryResult};
pub use models::{
    Action, ArrayDelta, Attributes, ChainStep, ChangeRecord, ChangeSet, EditSummary,
    EmbeddedDelta, FieldChange, ValuePair,
};
pub use traits::{DocumentNode, EmbedKind, IDocumentStore, ITypeMetadata};

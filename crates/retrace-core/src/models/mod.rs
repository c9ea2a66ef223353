//! Data model: change records and the structures derived from them.

pub mod change_record;
pub mod change_set;
pub mod edit_summary;

pub use change_record::{Action, Attributes, ChainStep, ChangeRecord};
pub use change_set::{ChangeSet, FieldChange};
pub use edit_summary::{ArrayDelta, EditSummary, EmbeddedDelta, ValuePair};

//! # retrace-engine
//!
//! Change-diffing and undo/redo reconstruction over embedded-document trees.
//!
//! Given before/after snapshots of a document's field values, the engine
//! computes a raw change set, classifies each field's edit (add, remove,
//! modify, array delta, nested-collection delta), and can reverse (undo) or
//! reapply (redo) the change against the live tree, addressing nested
//! documents through an association chain.
//!
//! The engine owns no documents and performs no persistence of its own: it
//! reads one immutable [`ChangeRecord`](retrace_core::ChangeRecord) at a
//! time and talks to the host model layer through the collaborator traits in
//! `retrace-core`.

pub mod apply;
pub mod classify;
pub mod engine;
pub mod localize;
pub mod resolve;
pub mod view;

pub use apply::Direction;
pub use engine::HistoryEngine;
pub use view::RecordView;

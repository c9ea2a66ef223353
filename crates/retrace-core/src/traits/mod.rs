//! Collaborator interfaces the engine consumes.
//!
//! Dynamic per-type behavior (tracked-field lookup, embedded-relation arity,
//! document access) is modeled as explicit capability traits implemented by
//! the host model layer; the engine depends only on these.

pub mod metadata;
pub mod store;

pub use metadata::{EmbedKind, ITypeMetadata};
pub use store::{DocumentNode, IDocumentStore};

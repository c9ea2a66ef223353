//! Shared test support for the retrace workspace.
//!
//! Provides an in-memory embedded-document tree store implementing
//! [`IDocumentStore`](retrace_core::IDocumentStore), a schema registry
//! implementing [`ITypeMetadata`](retrace_core::ITypeMetadata), and change
//! record builders, so engine tests can run against a real document tree
//! without any persistence layer.

pub mod builder;
pub mod schema;
pub mod store;

pub use builder::{attributes, ChangeRecordBuilder};
pub use schema::{SchemaRegistry, TypeSchema};
pub use store::{DocHandle, MemoryStore};

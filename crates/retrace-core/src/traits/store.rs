use serde_json::Value;

use crate::errors::HistoryResult;
use crate::models::Attributes;

/// Minimal view of a live document: its declared type name and id.
pub trait DocumentNode {
    fn type_name(&self) -> &str;
    fn id(&self) -> Option<&Value>;
}

/// Live document tree access.
///
/// All lookups MUST ignore any default scope/filter the type would normally
/// apply: the engine has to see soft-deleted and otherwise filtered
/// documents to resolve historical chains.
pub trait IDocumentStore: Send + Sync {
    /// Handle to a live document in the store.
    type Doc: DocumentNode + Clone;

    // --- Lookup (unscoped) ---
    fn find_root(&self, type_name: &str, id: &Value) -> HistoryResult<Option<Self::Doc>>;
    fn embedded_one(&self, parent: &Self::Doc, relation: &str)
        -> HistoryResult<Option<Self::Doc>>;
    fn embedded_many(
        &self,
        parent: &Self::Doc,
        relation: &str,
        id: &Value,
    ) -> HistoryResult<Option<Self::Doc>>;

    // --- Structural writes ---
    /// Create a root document. `attrs` may carry the id field to force an
    /// explicit id; otherwise the store assigns one.
    fn create_root(&self, type_name: &str, attrs: Attributes) -> HistoryResult<Self::Doc>;
    fn create_embedded_one(
        &self,
        parent: &Self::Doc,
        relation: &str,
        attrs: Attributes,
    ) -> HistoryResult<Self::Doc>;
    fn append_embedded_many(
        &self,
        parent: &Self::Doc,
        relation: &str,
        attrs: Attributes,
    ) -> HistoryResult<Self::Doc>;

    // --- Mutation ---
    /// Write the given attributes onto the document as a unit. A `null`
    /// value clears the field.
    fn mutate_attributes(&self, doc: &Self::Doc, attrs: Attributes) -> HistoryResult<()>;
    fn destroy(&self, doc: &Self::Doc) -> HistoryResult<()>;
}

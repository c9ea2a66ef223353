use serde::{Deserialize, Serialize};

/// Arity of an embedded relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbedKind {
    One,
    Many,
}

/// Per-type schema capabilities: which fields are tracked, how relations
/// embed, which fields use locale-qualified storage.
pub trait ITypeMetadata: Send + Sync {
    /// Whether changes to `field` on `type_name` are tracked at all.
    fn is_tracked(&self, type_name: &str, field: &str) -> bool;

    /// Arity of an embedded relation; `None` when `relation` is not an
    /// embedded relation of `type_name`.
    fn embed_kind(&self, type_name: &str, relation: &str) -> Option<EmbedKind>;

    /// Declared type of the documents under an embedded relation.
    fn related_type(&self, type_name: &str, relation: &str) -> Option<String>;

    /// Field names with locale-qualified storage.
    fn localized_fields(&self, type_name: &str) -> Vec<String>;

    /// Field recording who last touched the document.
    fn modifier_field(&self, type_name: &str) -> String;

    fn is_embeds_one(&self, type_name: &str, relation: &str) -> bool {
        matches!(self.embed_kind(type_name, relation), Some(EmbedKind::One))
    }

    fn is_embeds_many(&self, type_name: &str, relation: &str) -> bool {
        matches!(self.embed_kind(type_name, relation), Some(EmbedKind::Many))
    }
}

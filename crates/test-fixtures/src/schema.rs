//! Declarative per-type schema for tests.

use std::collections::{BTreeSet, HashMap};

use retrace_core::traits::{EmbedKind, ITypeMetadata};

/// Schema of one document type: tracked fields, embedded relations,
/// localized fields, modifier field.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    tracked: BTreeSet<String>,
    tracks_all: bool,
    embeds: HashMap<String, (EmbedKind, String)>,
    localized: BTreeSet<String>,
    modifier_field: String,
}

impl Default for TypeSchema {
    fn default() -> Self {
        Self {
            tracked: BTreeSet::new(),
            tracks_all: false,
            embeds: HashMap::new(),
            localized: BTreeSet::new(),
            modifier_field: "modifier_id".to_string(),
        }
    }
}

impl TypeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track the given fields.
    pub fn tracks(mut self, fields: &[&str]) -> Self {
        self.tracked.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Track every field.
    pub fn tracks_all(mut self) -> Self {
        self.tracks_all = true;
        self
    }

    pub fn embeds_one(mut self, relation: &str, related: &str) -> Self {
        self.embeds
            .insert(relation.to_string(), (EmbedKind::One, related.to_string()));
        self
    }

    pub fn embeds_many(mut self, relation: &str, related: &str) -> Self {
        self.embeds
            .insert(relation.to_string(), (EmbedKind::Many, related.to_string()));
        self
    }

    /// Declare locale-qualified storage for the given fields.
    pub fn localized(mut self, fields: &[&str]) -> Self {
        self.localized.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn modifier(mut self, field: &str) -> Self {
        self.modifier_field = field.to_string();
        self
    }
}

/// Registry of type schemas; the test implementation of [`ITypeMetadata`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, type_name: &str, schema: TypeSchema) -> Self {
        self.types.insert(type_name.to_string(), schema);
        self
    }
}

impl ITypeMetadata for SchemaRegistry {
    fn is_tracked(&self, type_name: &str, field: &str) -> bool {
        self.types
            .get(type_name)
            .map_or(false, |s| s.tracks_all || s.tracked.contains(field))
    }

    fn embed_kind(&self, type_name: &str, relation: &str) -> Option<EmbedKind> {
        self.types
            .get(type_name)
            .and_then(|s| s.embeds.get(relation))
            .map(|(kind, _)| *kind)
    }

    fn related_type(&self, type_name: &str, relation: &str) -> Option<String> {
        self.types
            .get(type_name)
            .and_then(|s| s.embeds.get(relation))
            .map(|(_, related)| related.clone())
    }

    fn localized_fields(&self, type_name: &str) -> Vec<String> {
        self.types
            .get(type_name)
            .map(|s| s.localized.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn modifier_field(&self, type_name: &str) -> String {
        self.types
            .get(type_name)
            .map(|s| s.modifier_field.clone())
            .unwrap_or_else(|| "modifier_id".to_string())
    }
}

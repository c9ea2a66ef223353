//! In-memory embedded-document tree store.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::{Map, Value};
use uuid::Uuid;

use retrace_core::errors::{HistoryError, HistoryResult};
use retrace_core::models::Attributes;
use retrace_core::traits::{DocumentNode, IDocumentStore, ITypeMetadata};

use crate::schema::SchemaRegistry;

const ID_FIELD: &str = "_id";

/// Path of one document inside the tree.
#[derive(Debug, Clone, PartialEq)]
enum PathSeg {
    Root { type_name: String, id: Value },
    One { relation: String },
    Many { relation: String, id: Value },
}

/// Handle to a live document in a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocHandle {
    type_name: String,
    id: Option<Value>,
    path: Vec<PathSeg>,
}

impl DocumentNode for DocHandle {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }
}

/// In-memory implementation of `IDocumentStore`.
///
/// Documents are JSON objects; embedded relations are nested objects and
/// arrays, exactly like a document database lays them out. Default filters
/// registered via [`set_default_filter`](MemoryStore::set_default_filter)
/// affect only the [`scoped_roots`](MemoryStore::scoped_roots) helper — the
/// trait lookups bypass them, per the trait contract.
pub struct MemoryStore {
    schema: SchemaRegistry,
    roots: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
    filters: RwLock<HashMap<String, (String, Value)>>,
}

impl MemoryStore {
    pub fn new(schema: SchemaRegistry) -> Self {
        Self {
            schema,
            roots: RwLock::new(HashMap::new()),
            filters: RwLock::new(HashMap::new()),
        }
    }

    /// Register a default filter: scoped queries on `type_name` hide
    /// documents whose `field` equals `hidden_value`.
    pub fn set_default_filter(&self, type_name: &str, field: &str, hidden_value: Value) {
        self.filters
            .write()
            .expect("store lock poisoned")
            .insert(type_name.to_string(), (field.to_string(), hidden_value));
    }

    /// Ids a default-scoped query for `type_name` would return. Exists to
    /// contrast with the unscoped trait lookups in tests.
    pub fn scoped_roots(&self, type_name: &str) -> Vec<Value> {
        let filters = self.filters.read().expect("store lock poisoned");
        let roots = self.roots.read().expect("store lock poisoned");
        roots
            .get(type_name)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| match filters.get(type_name) {
                        Some((field, hidden)) => doc.get(field) != Some(hidden),
                        None => true,
                    })
                    .filter_map(|doc| doc.get(ID_FIELD).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Current attributes of the document a handle points at.
    pub fn attributes_of(&self, doc: &DocHandle) -> Option<Attributes> {
        let roots = self.roots.read().expect("store lock poisoned");
        doc_in(&roots, &doc.path).cloned()
    }

    pub fn root_count(&self, type_name: &str) -> usize {
        self.roots
            .read()
            .expect("store lock poisoned")
            .get(type_name)
            .map_or(0, Vec::len)
    }

    fn related_type_or(&self, parent_type: &str, relation: &str) -> String {
        self.schema
            .related_type(parent_type, relation)
            .unwrap_or_else(|| relation.to_string())
    }
}

impl IDocumentStore for MemoryStore {
    type Doc = DocHandle;

    fn find_root(&self, type_name: &str, id: &Value) -> HistoryResult<Option<DocHandle>> {
        let roots = self.roots.read().expect("store lock poisoned");
        let found = roots
            .get(type_name)
            .map_or(false, |docs| docs.iter().any(|d| d.get(ID_FIELD) == Some(id)));
        Ok(found.then(|| DocHandle {
            type_name: type_name.to_string(),
            id: Some(id.clone()),
            path: vec![PathSeg::Root {
                type_name: type_name.to_string(),
                id: id.clone(),
            }],
        }))
    }

    fn embedded_one(&self, parent: &DocHandle, relation: &str) -> HistoryResult<Option<DocHandle>> {
        let roots = self.roots.read().expect("store lock poisoned");
        let Some(parent_doc) = doc_in(&roots, &parent.path) else {
            return Ok(None);
        };
        let Some(embedded) = parent_doc.get(relation).and_then(Value::as_object) else {
            return Ok(None);
        };

        let mut path = parent.path.clone();
        path.push(PathSeg::One {
            relation: relation.to_string(),
        });
        Ok(Some(DocHandle {
            type_name: self.related_type_or(&parent.type_name, relation),
            id: embedded.get(ID_FIELD).cloned(),
            path,
        }))
    }

    fn embedded_many(
        &self,
        parent: &DocHandle,
        relation: &str,
        id: &Value,
    ) -> HistoryResult<Option<DocHandle>> {
        let roots = self.roots.read().expect("store lock poisoned");
        let Some(parent_doc) = doc_in(&roots, &parent.path) else {
            return Ok(None);
        };
        let found = parent_doc
            .get(relation)
            .and_then(Value::as_array)
            .map_or(false, |items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .any(|el| el.get(ID_FIELD) == Some(id))
            });
        if !found {
            return Ok(None);
        }

        let mut path = parent.path.clone();
        path.push(PathSeg::Many {
            relation: relation.to_string(),
            id: id.clone(),
        });
        Ok(Some(DocHandle {
            type_name: self.related_type_or(&parent.type_name, relation),
            id: Some(id.clone()),
            path,
        }))
    }

    fn create_root(&self, type_name: &str, attrs: Attributes) -> HistoryResult<DocHandle> {
        let mut attrs = attrs;
        let id = attrs
            .get(ID_FIELD)
            .cloned()
            .unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()));
        attrs.insert(ID_FIELD.to_string(), id.clone());

        let mut roots = self.roots.write().expect("store lock poisoned");
        let docs = roots.entry(type_name.to_string()).or_default();
        if docs.iter().any(|d| d.get(ID_FIELD) == Some(&id)) {
            return Err(HistoryError::MutationRejected {
                reason: format!("root `{type_name}` with id {id} already exists"),
            });
        }
        docs.push(attrs);

        Ok(DocHandle {
            type_name: type_name.to_string(),
            id: Some(id.clone()),
            path: vec![PathSeg::Root {
                type_name: type_name.to_string(),
                id,
            }],
        })
    }

    fn create_embedded_one(
        &self,
        parent: &DocHandle,
        relation: &str,
        attrs: Attributes,
    ) -> HistoryResult<DocHandle> {
        let mut roots = self.roots.write().expect("store lock poisoned");
        let parent_doc =
            doc_in_mut(&mut roots, &parent.path).ok_or_else(|| HistoryError::MutationRejected {
                reason: "parent document no longer exists".to_string(),
            })?;

        let id = attrs.get(ID_FIELD).cloned();
        parent_doc.insert(relation.to_string(), Value::Object(attrs));

        let mut path = parent.path.clone();
        path.push(PathSeg::One {
            relation: relation.to_string(),
        });
        Ok(DocHandle {
            type_name: self.related_type_or(&parent.type_name, relation),
            id,
            path,
        })
    }

    fn append_embedded_many(
        &self,
        parent: &DocHandle,
        relation: &str,
        attrs: Attributes,
    ) -> HistoryResult<DocHandle> {
        let mut attrs = attrs;
        let id = attrs
            .get(ID_FIELD)
            .cloned()
            .unwrap_or_else(|| Value::String(Uuid::new_v4().to_string()));
        attrs.insert(ID_FIELD.to_string(), id.clone());

        let mut roots = self.roots.write().expect("store lock poisoned");
        let parent_doc =
            doc_in_mut(&mut roots, &parent.path).ok_or_else(|| HistoryError::MutationRejected {
                reason: "parent document no longer exists".to_string(),
            })?;

        let slot = parent_doc
            .entry(relation.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let items = slot
            .as_array_mut()
            .ok_or_else(|| HistoryError::MutationRejected {
                reason: format!("relation `{relation}` is not a collection"),
            })?;
        items.push(Value::Object(attrs));

        let mut path = parent.path.clone();
        path.push(PathSeg::Many {
            relation: relation.to_string(),
            id: id.clone(),
        });
        Ok(DocHandle {
            type_name: self.related_type_or(&parent.type_name, relation),
            id: Some(id),
            path,
        })
    }

    fn mutate_attributes(&self, doc: &DocHandle, attrs: Attributes) -> HistoryResult<()> {
        let mut roots = self.roots.write().expect("store lock poisoned");
        let target =
            doc_in_mut(&mut roots, &doc.path).ok_or_else(|| HistoryError::MutationRejected {
                reason: "document no longer exists".to_string(),
            })?;

        for (key, value) in attrs {
            if value.is_null() {
                target.remove(&key);
            } else {
                target.insert(key, value);
            }
        }
        Ok(())
    }

    fn destroy(&self, doc: &DocHandle) -> HistoryResult<()> {
        let mut roots = self.roots.write().expect("store lock poisoned");
        let Some((last, parent_path)) = doc.path.split_last() else {
            return Err(HistoryError::MutationRejected {
                reason: "handle has no path".to_string(),
            });
        };

        match last {
            PathSeg::Root { type_name, id } => {
                let docs = roots
                    .get_mut(type_name)
                    .ok_or_else(|| HistoryError::MutationRejected {
                        reason: "document no longer exists".to_string(),
                    })?;
                let before = docs.len();
                docs.retain(|d| d.get(ID_FIELD) != Some(id));
                if docs.len() == before {
                    return Err(HistoryError::MutationRejected {
                        reason: "document no longer exists".to_string(),
                    });
                }
            }
            PathSeg::One { relation } => {
                let parent = doc_in_mut(&mut roots, parent_path).ok_or_else(|| {
                    HistoryError::MutationRejected {
                        reason: "parent document no longer exists".to_string(),
                    }
                })?;
                if parent.remove(relation).is_none() {
                    return Err(HistoryError::MutationRejected {
                        reason: "document no longer exists".to_string(),
                    });
                }
            }
            PathSeg::Many { relation, id } => {
                let parent = doc_in_mut(&mut roots, parent_path).ok_or_else(|| {
                    HistoryError::MutationRejected {
                        reason: "parent document no longer exists".to_string(),
                    }
                })?;
                let items = parent
                    .get_mut(relation)
                    .and_then(Value::as_array_mut)
                    .ok_or_else(|| HistoryError::MutationRejected {
                        reason: "document no longer exists".to_string(),
                    })?;
                let before = items.len();
                items.retain(|el| el.get(ID_FIELD) != Some(id));
                if items.len() == before {
                    return Err(HistoryError::MutationRejected {
                        reason: "document no longer exists".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Navigate a path to the document object it addresses.
fn doc_in<'t>(
    roots: &'t HashMap<String, Vec<Map<String, Value>>>,
    path: &[PathSeg],
) -> Option<&'t Map<String, Value>> {
    let (first, rest) = path.split_first()?;
    let mut current = match first {
        PathSeg::Root { type_name, id } => roots
            .get(type_name)?
            .iter()
            .find(|d| d.get(ID_FIELD) == Some(id))?,
        _ => return None,
    };

    for seg in rest {
        current = match seg {
            PathSeg::One { relation } => current.get(relation)?.as_object()?,
            PathSeg::Many { relation, id } => current
                .get(relation)?
                .as_array()?
                .iter()
                .filter_map(Value::as_object)
                .find(|el| el.get(ID_FIELD) == Some(id))?,
            PathSeg::Root { .. } => return None,
        };
    }
    Some(current)
}

fn doc_in_mut<'t>(
    roots: &'t mut HashMap<String, Vec<Map<String, Value>>>,
    path: &[PathSeg],
) -> Option<&'t mut Map<String, Value>> {
    let (first, rest) = path.split_first()?;
    let mut current = match first {
        PathSeg::Root { type_name, id } => roots
            .get_mut(type_name)?
            .iter_mut()
            .find(|d| d.get(ID_FIELD) == Some(id))?,
        _ => return None,
    };

    for seg in rest {
        current = match seg {
            PathSeg::One { relation } => current.get_mut(relation)?.as_object_mut()?,
            PathSeg::Many { relation, id } => current
                .get_mut(relation)?
                .as_array_mut()?
                .iter_mut()
                .filter(|el| el.get(ID_FIELD) == Some(id))
                .find_map(Value::as_object_mut)?,
            PathSeg::Root { .. } => return None,
        };
    }
    Some(current)
}

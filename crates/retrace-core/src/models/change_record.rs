use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{HistoryError, HistoryResult};

/// Open field-name → value mapping used for snapshots and write-backs.
///
/// Key absence and `Value::Null` are distinct states. Classification
/// collapses both to "blank"; write-backs preserve explicit nulls.
pub type Attributes = serde_json::Map<String, Value>;

/// What kind of change a record captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Update,
    Destroy,
}

/// One step of an association chain.
///
/// Step 0 names the root document type and carries its id. Later steps name
/// embedded relations; `id` is present for to-many relation steps and absent
/// for to-one steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl ChainStep {
    /// Step addressing a document by id: the root step, or a to-many element.
    pub fn with_id(name: impl Into<String>, id: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            id: Some(id.into()),
        }
    }

    /// Step addressing a to-one embedded relation.
    pub fn to_one(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }
}

/// One historical change event.
///
/// Created at the moment a tracked change is captured, immutable thereafter.
/// The engine only reads it; derived structures are cached outside the
/// record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// The unique path from a root aggregate to the changed document.
    /// Invariant: non-empty.
    pub association_chain: Vec<ChainStep>,
    /// Field values after the change. Empty for a pure destroy.
    #[serde(default)]
    pub modified: Attributes,
    /// Field values before the change. Empty for a pure create.
    #[serde(default)]
    pub original: Attributes,
    /// Position of this record in the document's history.
    pub version: u64,
    pub action: Action,
    /// History scope the record was captured under.
    pub scope: String,
    /// Identity of whoever made the change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_id: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChangeRecord {
    /// The root step: the root aggregate's type name and id.
    pub fn root_step(&self) -> HistoryResult<&ChainStep> {
        self.association_chain
            .first()
            .ok_or_else(|| HistoryError::MalformedRecord {
                reason: "association chain is empty".to_string(),
            })
    }

    /// The last step: the changed document itself.
    pub fn leaf_step(&self) -> HistoryResult<&ChainStep> {
        self.association_chain
            .last()
            .ok_or_else(|| HistoryError::MalformedRecord {
                reason: "association chain is empty".to_string(),
            })
    }

    /// Whether the chain addresses a root document directly.
    pub fn is_root_only(&self) -> bool {
        self.association_chain.len() == 1
    }
}

//! Change record construction helpers.

use chrono::Utc;
use serde_json::Value;

use retrace_core::models::{Action, Attributes, ChainStep, ChangeRecord};

/// Convert a `serde_json::json!` object literal into [`Attributes`].
///
/// # Panics
/// Panics when the value is not a JSON object.
pub fn attributes(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Builder for [`ChangeRecord`]s in tests.
#[derive(Debug, Clone)]
pub struct ChangeRecordBuilder {
    action: Action,
    chain: Vec<ChainStep>,
    original: Attributes,
    modified: Attributes,
    version: u64,
    scope: String,
    modifier_id: Option<Value>,
}

impl ChangeRecordBuilder {
    pub fn create() -> Self {
        Self::with_action(Action::Create)
    }

    pub fn update() -> Self {
        Self::with_action(Action::Update)
    }

    pub fn destroy() -> Self {
        Self::with_action(Action::Destroy)
    }

    fn with_action(action: Action) -> Self {
        Self {
            action,
            chain: Vec::new(),
            original: Attributes::new(),
            modified: Attributes::new(),
            version: 1,
            scope: "default".to_string(),
            modifier_id: None,
        }
    }

    /// Root chain step: the root aggregate's type and id.
    pub fn root(mut self, type_name: &str, id: impl Into<Value>) -> Self {
        self.chain.push(ChainStep::with_id(type_name, id));
        self
    }

    /// Nested step through a to-one embedded relation.
    pub fn step_one(mut self, relation: &str) -> Self {
        self.chain.push(ChainStep::to_one(relation));
        self
    }

    /// Nested step through a to-many embedded relation.
    pub fn step_many(mut self, relation: &str, id: impl Into<Value>) -> Self {
        self.chain.push(ChainStep::with_id(relation, id));
        self
    }

    /// Before-snapshot, as a `json!` object literal.
    pub fn original(mut self, value: Value) -> Self {
        self.original = attributes(value);
        self
    }

    /// After-snapshot, as a `json!` object literal.
    pub fn modified(mut self, value: Value) -> Self {
        self.modified = attributes(value);
        self
    }

    pub fn version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    pub fn modifier_id(mut self, id: impl Into<Value>) -> Self {
        self.modifier_id = Some(id.into());
        self
    }

    pub fn build(self) -> ChangeRecord {
        let now = Utc::now();
        ChangeRecord {
            association_chain: self.chain,
            modified: self.modified,
            original: self.original,
            version: self.version,
            action: self.action,
            scope: self.scope,
            modifier_id: self.modifier_id,
            created_at: now,
            updated_at: now,
        }
    }
}

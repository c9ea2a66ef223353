use serde::{Deserialize, Serialize};

use crate::constants;

/// Engine configuration.
///
/// The defaults match the conventional embedded-document layout: records
/// carry their id under `_id`, localized fields are stored under a
/// `_translations`-suffixed key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Id key of stored documents and embedded collection elements.
    pub id_field: String,
    /// Suffix appended to locale-qualified field keys on write-back.
    pub locale_suffix: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            id_field: constants::DEFAULT_ID_FIELD.to_string(),
            locale_suffix: constants::DEFAULT_LOCALE_SUFFIX.to_string(),
        }
    }
}

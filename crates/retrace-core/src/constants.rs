//! Shared defaults for the engine configuration.

/// Internal id key of stored documents and embedded collection elements.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Suffix appended to locale-qualified field keys on write-back.
pub const DEFAULT_LOCALE_SUFFIX: &str = "_translations";

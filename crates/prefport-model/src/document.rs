//! The versioned exchange document.

use chrono::{DateTime, Utc};

use crate::{PreferenceMap, PromptList};

/// Current schema version.
///
/// Documents carrying any other version are rejected on import; there is no
/// migration path.
pub const SCHEMA_VERSION: u32 = 1;

/// Application identifier a document must carry to be importable.
pub const APP_ID: &str = "net.devemperor.asr";

/// A complete configuration snapshot.
///
/// Lives only for the duration of one export or one import.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub version: u32,
    pub app_id: String,
    /// Milliseconds since the Unix epoch. Informational only.
    pub exported_at_ms: i64,
    /// Whether sensitive keys were kept at export time. Informational only.
    pub include_secrets: bool,
    pub preferences: PreferenceMap,
    pub prompts: PromptList,
}

impl ConfigDocument {
    /// Create a document for this application stamped with the current time.
    pub fn new(preferences: PreferenceMap, prompts: PromptList, include_secrets: bool) -> Self {
        Self {
            version: SCHEMA_VERSION,
            app_id: APP_ID.to_string(),
            exported_at_ms: Utc::now().timestamp_millis(),
            include_secrets,
            preferences,
            prompts,
        }
    }

    /// Parse the export timestamp.
    pub fn exported_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.exported_at_ms)
    }

    /// Whether the metadata identifies a document this build can import.
    pub fn is_compatible(&self) -> bool {
        self.version == SCHEMA_VERSION && self.app_id == APP_ID
    }
}

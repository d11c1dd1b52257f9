//! Export document assembly.

use prefport_model::{ConfigDocument, PreferenceMap, PromptList, PromptRecord};
use tracing::debug;

use crate::codec;
use crate::sensitivity::is_sensitive;

/// Counts describing what an export kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Preferences written to the document.
    pub preferences: usize,
    /// Credential keys omitted because secrets were excluded.
    pub skipped_sensitive: usize,
    /// Keys whose value the document format cannot carry.
    pub skipped_unsupported: usize,
    /// Prompts written to the document.
    pub prompts: usize,
}

/// Builds a [`ConfigDocument`] from the current store contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentBuilder {
    include_secrets: bool,
    exported_at_ms: Option<i64>,
}

impl DocumentBuilder {
    /// Create a builder. Sensitive keys are kept only if `include_secrets`.
    pub fn new(include_secrets: bool) -> Self {
        Self {
            include_secrets,
            exported_at_ms: None,
        }
    }

    /// Use a fixed export timestamp instead of the wall clock.
    #[must_use]
    pub fn with_timestamp(mut self, exported_at_ms: i64) -> Self {
        self.exported_at_ms = Some(exported_at_ms);
        self
    }

    /// Assemble the document.
    pub fn build(
        &self,
        preferences: &PreferenceMap,
        prompts: &[PromptRecord],
    ) -> (ConfigDocument, ExportReport) {
        let mut report = ExportReport::default();
        let mut kept = PreferenceMap::new();

        for (key, value) in preferences {
            if !self.include_secrets && is_sensitive(key) {
                debug!(key = %key, "omitting sensitive preference");
                report.skipped_sensitive += 1;
                continue;
            }
            if codec::encode(value).is_none() {
                debug!(key = %key, kind = %value.kind(), "omitting unsupported preference value");
                report.skipped_unsupported += 1;
                continue;
            }
            kept.insert(key.clone(), value.clone());
        }
        report.preferences = kept.len();

        let prompts: PromptList = prompts.iter().cloned().collect();
        report.prompts = prompts.len();

        let mut document = ConfigDocument::new(kept, prompts, self.include_secrets);
        if let Some(exported_at_ms) = self.exported_at_ms {
            document.exported_at_ms = exported_at_ms;
        }
        (document, report)
    }
}

/// Assemble an export document stamped with the current time.
pub fn build_document(
    preferences: &PreferenceMap,
    prompts: &[PromptRecord],
    include_secrets: bool,
) -> ConfigDocument {
    DocumentBuilder::new(include_secrets)
        .build(preferences, prompts)
        .0
}

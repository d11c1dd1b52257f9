//! Snapshot, replace and rollback around an import.

use std::fmt;

use prefport_model::{PreferenceMap, PromptRecord};
use tracing::{debug, error, info, warn};

use super::parse::parse_document;
use crate::error::{Result, StoreError, TransferError};
use crate::store::{PreferenceStore, PromptStore};

/// Stage of an import, used in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Snapshotting,
    Parsing,
    Replacing,
    Committed,
    RollingBack,
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Snapshotting => "snapshotting",
            Self::Parsing => "parsing",
            Self::Replacing => "replacing",
            Self::Committed => "committed",
            Self::RollingBack => "rolling back",
        };
        f.write_str(name)
    }
}

/// Contents of both stores taken before an import touches them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub preferences: PreferenceMap,
    pub prompts: Vec<PromptRecord>,
}

impl Snapshot {
    /// Read the full contents of both stores.
    pub fn capture<P, Q>(preferences: &P, prompts: &Q) -> std::result::Result<Self, StoreError>
    where
        P: PreferenceStore + ?Sized,
        Q: PromptStore + ?Sized,
    {
        Ok(Self {
            preferences: preferences.get_all()?,
            prompts: prompts.get_all()?,
        })
    }

    /// Write the snapshot back into both stores.
    ///
    /// Both stores are attempted even if the first fails. Failures are logged
    /// and dropped; the caller reports the error that triggered the rollback.
    pub fn restore<P, Q>(&self, preferences: &mut P, prompts: &mut Q)
    where
        P: PreferenceStore + ?Sized,
        Q: PromptStore + ?Sized,
    {
        if let Err(e) = preferences.clear_and_commit(&self.preferences) {
            error!(error = %e, "failed to restore preferences");
        }
        if let Err(e) = prompts.replace_all(&self.prompts) {
            error!(error = %e, "failed to restore prompts");
        }
    }
}

/// Outcome of a committed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Preferences now in the store.
    pub preferences: usize,
    /// Prompts now in the store.
    pub prompts: usize,
    /// Whether the imported file was exported with secrets.
    pub include_secrets: bool,
    /// Export timestamp carried by the file.
    pub exported_at_ms: i64,
}

impl ImportReport {
    /// Running components cache settings, so a committed import always needs
    /// a reload to take effect.
    pub fn reload_required(&self) -> bool {
        true
    }
}

/// Replace both stores with the contents of `bytes`.
///
/// The stores end up either fully replaced or as they were before the call.
/// Prompts are replaced as a whole and receive fresh identifiers.
pub fn import_document<P, Q>(
    preferences: &mut P,
    prompts: &mut Q,
    bytes: &[u8],
) -> Result<ImportReport>
where
    P: PreferenceStore + ?Sized,
    Q: PromptStore + ?Sized,
{
    debug!(phase = %ImportPhase::Snapshotting, "import");
    let snapshot = Snapshot::capture(preferences, prompts)
        .map_err(|source| TransferError::Snapshot { source })?;

    debug!(phase = %ImportPhase::Parsing, bytes = bytes.len(), "import");
    let document = match parse_document(bytes) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "rejected configuration file");
            return Err(e);
        }
    };

    debug!(phase = %ImportPhase::Replacing, "import");
    let records = document.prompts.into_vec();
    let replaced = preferences
        .clear_and_commit(&document.preferences)
        .and_then(|()| prompts.replace_all(&records));

    if let Err(source) = replaced {
        warn!(phase = %ImportPhase::RollingBack, error = %source, "import");
        snapshot.restore(preferences, prompts);
        return Err(TransferError::Commit { source });
    }

    let report = ImportReport {
        preferences: document.preferences.len(),
        prompts: records.len(),
        include_secrets: document.include_secrets,
        exported_at_ms: document.exported_at_ms,
    };
    info!(
        phase = %ImportPhase::Committed,
        preferences = report.preferences,
        prompts = report.prompts,
        "imported configuration"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryPreferenceStore, MemoryPromptStore};
    use prefport_model::TypedValue;

    fn seeded() -> (MemoryPreferenceStore, MemoryPromptStore) {
        let mut values = PreferenceMap::new();
        values.insert("old".to_string(), TypedValue::Int(7));
        let old = PromptRecord::new_unassigned("Old", "old body", false, false);
        let prompts = MemoryPromptStore::new(&[old]);
        (MemoryPreferenceStore::new(values), prompts)
    }

    #[test]
    fn test_import_replaces_both_stores() {
        let (mut prefs, mut prompts) = seeded();
        let bytes = br#"{
            "version": 1,
            "appId": "net.devemperor.asr",
            "exportedAt": 1700000000000,
            "includeSecrets": false,
            "preferences": {"new": {"type": "boolean", "value": true}},
            "prompts": [{"name": "Fix", "prompt": "Fix grammar", "requiresSelection": true}]
        }"#;

        let report = import_document(&mut prefs, &mut prompts, bytes).unwrap();

        assert_eq!(report.preferences, 1);
        assert_eq!(report.prompts, 1);
        assert_eq!(report.exported_at_ms, 1_700_000_000_000);
        assert!(report.reload_required());
        assert_eq!(prefs.values().len(), 1);
        assert_eq!(prefs.values()["new"], TypedValue::Boolean(true));
        assert_eq!(prompts.records()[0].name, "Fix");
        assert!(prompts.records()[0].requires_selection);
        assert!(!prompts.records()[0].is_unassigned());
    }

    #[test]
    fn test_parse_failure_leaves_stores_alone() {
        let (mut prefs, mut prompts) = seeded();
        let before = (prefs.clone(), prompts.clone());

        let result = import_document(&mut prefs, &mut prompts, b"{not json");

        assert!(matches!(result, Err(TransferError::Malformed { .. })));
        assert_eq!((prefs, prompts), before);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(ImportPhase::RollingBack.to_string(), "rolling back");
        assert_eq!(ImportPhase::Committed.to_string(), "committed");
    }
}

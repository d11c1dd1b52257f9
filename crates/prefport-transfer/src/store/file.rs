//! JSON file-backed stores.
//!
//! A missing file reads as an empty store. Every write goes through a temp
//! file and a rename, so a crash never leaves a half-written store behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use prefport_model::{PreferenceMap, PromptList, PromptRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::{PreferenceStore, PromptStore, assign_identifiers};
use crate::codec;
use crate::error::StoreError;
use crate::io::{WriteFailure, write_atomic};

/// Preference store persisted as a JSON object of `{type, value}` envelopes.
#[derive(Debug, Clone)]
pub struct JsonPreferenceFile {
    path: PathBuf,
}

impl JsonPreferenceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonPreferenceFile {
    fn get_all(&self) -> Result<PreferenceMap, StoreError> {
        let Some(contents) = read_optional(&self.path)? else {
            return Ok(PreferenceMap::new());
        };
        let root: Value = serde_json::from_str(&contents).map_err(|e| corrupt(&self.path, e))?;
        let entries = root
            .as_object()
            .ok_or_else(|| corrupt(&self.path, "root is not an object"))?;

        entries
            .iter()
            .map(|(key, envelope)| {
                codec::decode(envelope)
                    .map(|value| (key.clone(), value))
                    .map_err(|e| corrupt(&self.path, format!("{key}: {e}")))
            })
            .collect()
    }

    fn clear_and_commit(&mut self, preferences: &PreferenceMap) -> Result<(), StoreError> {
        let mut entries = Map::new();
        for (key, value) in preferences {
            let envelope = codec::encode(value)
                .ok_or_else(|| StoreError::Unrepresentable { key: key.clone() })?;
            entries.insert(key.clone(), envelope.into_json());
        }
        let bytes = serde_json::to_vec_pretty(&Value::Object(entries))
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        write_atomic(&self.path, &bytes).map_err(store_io)?;
        debug!(path = %self.path.display(), count = preferences.len(), "committed preferences");
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPrompt {
    id: i64,
    name: String,
    prompt: String,
    #[serde(default)]
    requires_selection: bool,
    #[serde(default)]
    auto_apply: bool,
}

/// Prompt store persisted as a JSON array in list order.
#[derive(Debug, Clone)]
pub struct JsonPromptFile {
    path: PathBuf,
}

impl JsonPromptFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PromptStore for JsonPromptFile {
    fn get_all(&self) -> Result<Vec<PromptRecord>, StoreError> {
        let Some(contents) = read_optional(&self.path)? else {
            return Ok(Vec::new());
        };
        let stored: Vec<StoredPrompt> =
            serde_json::from_str(&contents).map_err(|e| corrupt(&self.path, e))?;

        let list: PromptList = stored
            .into_iter()
            .map(|p| PromptRecord {
                id: p.id,
                position: 0,
                name: p.name,
                prompt: p.prompt,
                requires_selection: p.requires_selection,
                auto_apply: p.auto_apply,
            })
            .collect();
        Ok(list.into_vec())
    }

    fn replace_all(&mut self, prompts: &[PromptRecord]) -> Result<(), StoreError> {
        let stored: Vec<StoredPrompt> = assign_identifiers(prompts)
            .into_iter()
            .map(|r| StoredPrompt {
                id: r.id,
                name: r.name,
                prompt: r.prompt,
                requires_selection: r.requires_selection,
                auto_apply: r.auto_apply,
            })
            .collect();
        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        write_atomic(&self.path, &bytes).map_err(store_io)?;
        debug!(path = %self.path.display(), count = stored.len(), "replaced prompts");
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn corrupt(path: &Path, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn store_io(failure: WriteFailure) -> StoreError {
    StoreError::Io {
        operation: failure.operation,
        path: failure.path,
        source: failure.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefport_model::TypedValue;
    use tempfile::tempdir;

    #[test]
    fn test_missing_files_read_as_empty() {
        let dir = tempdir().unwrap();
        let prefs = JsonPreferenceFile::new(dir.path().join("prefs.json"));
        let prompts = JsonPromptFile::new(dir.path().join("prompts.json"));
        assert!(prefs.get_all().unwrap().is_empty());
        assert!(prompts.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_preference_file_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = JsonPreferenceFile::new(dir.path().join("nested/prefs.json"));

        let mut values = PreferenceMap::new();
        values.insert("speed".to_string(), TypedValue::Int(5));
        values.insert("ratio".to_string(), TypedValue::Float(0.75));
        values.insert("langs".to_string(), TypedValue::string_set(["en", "it"]));
        store.clear_and_commit(&values).unwrap();

        assert_eq!(store.get_all().unwrap(), values);
        assert!(!dir.path().join("nested/prefs.json.tmp").exists());
    }

    #[test]
    fn test_preference_file_rejects_unrepresentable_value() {
        let dir = tempdir().unwrap();
        let mut store = JsonPreferenceFile::new(dir.path().join("prefs.json"));
        let mut values = PreferenceMap::new();
        values.insert("nan".to_string(), TypedValue::Float(f32::NAN));

        assert!(matches!(
            store.clear_and_commit(&values),
            Err(StoreError::Unrepresentable { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_preference_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"k": {"type": "nope", "value": 1}}"#).unwrap();
        let store = JsonPreferenceFile::new(&path);
        assert!(matches!(store.get_all(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_prompt_file_assigns_and_keeps_ids() {
        let dir = tempdir().unwrap();
        let mut store = JsonPromptFile::new(dir.path().join("prompts.json"));
        store
            .replace_all(&[
                PromptRecord::new_unassigned("a", "1", false, true),
                PromptRecord::new_unassigned("b", "2", true, false),
            ])
            .unwrap();
        let first = store.get_all().unwrap();
        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(first[1].position, 1);
        assert!(first[0].auto_apply);

        store.replace_all(&first).unwrap();
        assert_eq!(store.get_all().unwrap(), first);
    }
}

//! In-memory stores.

use prefport_model::{PreferenceMap, PromptRecord};

use super::{PreferenceStore, PromptStore, assign_identifiers};
use crate::error::StoreError;

/// Preference store held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPreferenceStore {
    values: PreferenceMap,
}

impl MemoryPreferenceStore {
    /// Create a store with initial contents.
    pub fn new(values: PreferenceMap) -> Self {
        Self { values }
    }

    /// Current contents.
    pub fn values(&self) -> &PreferenceMap {
        &self.values
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_all(&self) -> Result<PreferenceMap, StoreError> {
        Ok(self.values.clone())
    }

    fn clear_and_commit(&mut self, preferences: &PreferenceMap) -> Result<(), StoreError> {
        self.values = preferences.clone();
        Ok(())
    }
}

/// Prompt store held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPromptStore {
    records: Vec<PromptRecord>,
}

impl MemoryPromptStore {
    /// Create a store with initial records. Unassigned records get identifiers.
    pub fn new(records: &[PromptRecord]) -> Self {
        Self {
            records: assign_identifiers(records),
        }
    }

    /// Current records in list order.
    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }
}

impl PromptStore for MemoryPromptStore {
    fn get_all(&self) -> Result<Vec<PromptRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn replace_all(&mut self, prompts: &[PromptRecord]) -> Result<(), StoreError> {
        self.records = assign_identifiers(prompts);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefport_model::TypedValue;

    #[test]
    fn test_preference_commit_replaces_everything() {
        let mut initial = PreferenceMap::new();
        initial.insert("old".to_string(), TypedValue::Int(1));
        let mut store = MemoryPreferenceStore::new(initial);

        let mut next = PreferenceMap::new();
        next.insert("new".to_string(), TypedValue::Int(2));
        store.clear_and_commit(&next).unwrap();

        assert_eq!(store.get_all().unwrap(), next);
    }

    #[test]
    fn test_prompt_replace_assigns_ids() {
        let mut store = MemoryPromptStore::default();
        store
            .replace_all(&[
                PromptRecord::new_unassigned("a", "1", false, false),
                PromptRecord::new_unassigned("b", "2", true, false),
            ])
            .unwrap();
        let records = store.get_all().unwrap();
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].position, 1);
    }
}

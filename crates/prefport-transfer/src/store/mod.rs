//! Store ports consumed by export and import.
//!
//! The preference store and the prompt store are owned by the host
//! application. Both expose whole-store reads and whole-store replacement;
//! neither offers a cross-store transaction, so import coordinates them
//! itself.

mod file;
mod memory;

pub use file::{JsonPreferenceFile, JsonPromptFile};
pub use memory::{MemoryPreferenceStore, MemoryPromptStore};

use prefport_model::{PreferenceMap, PromptRecord, UNASSIGNED_PROMPT_ID};

use crate::error::StoreError;

/// Key to typed value store.
pub trait PreferenceStore {
    /// Read every entry.
    fn get_all(&self) -> Result<PreferenceMap, StoreError>;

    /// Clear the store and write `preferences` as one commit.
    fn clear_and_commit(&mut self, preferences: &PreferenceMap) -> Result<(), StoreError>;
}

/// Ordered prompt record store.
pub trait PromptStore {
    /// Read every record in list order.
    fn get_all(&self) -> Result<Vec<PromptRecord>, StoreError>;

    /// Replace the whole list with `prompts`, in the given order.
    fn replace_all(&mut self, prompts: &[PromptRecord]) -> Result<(), StoreError>;
}

/// Give unassigned records fresh identifiers and renumber positions.
///
/// Existing identifiers are kept so that restoring a snapshot restores them.
pub(crate) fn assign_identifiers(prompts: &[PromptRecord]) -> Vec<PromptRecord> {
    let mut next_id = prompts
        .iter()
        .map(|record| record.id)
        .max()
        .unwrap_or(UNASSIGNED_PROMPT_ID)
        .max(UNASSIGNED_PROMPT_ID)
        + 1;

    prompts
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let mut record = record.clone();
            record.position = position;
            if record.is_unassigned() {
                record.id = next_id;
                next_id += 1;
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_identifiers_keeps_existing_ids() {
        let prompts = vec![
            PromptRecord {
                id: 5,
                ..PromptRecord::new_unassigned("a", "1", false, false)
            },
            PromptRecord::new_unassigned("b", "2", false, false),
            PromptRecord::new_unassigned("c", "3", false, false),
        ];
        let stored = assign_identifiers(&prompts);
        let ids: Vec<i64> = stored.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
        assert_eq!(stored[2].position, 2);
    }

    #[test]
    fn test_assign_identifiers_starts_at_one() {
        let stored = assign_identifiers(&[PromptRecord::new_unassigned("a", "1", false, false)]);
        assert_eq!(stored[0].id, 1);
    }
}

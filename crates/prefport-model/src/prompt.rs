//! Rewording prompt records.

use std::ops::Deref;

/// Identifier of a prompt that has not been stored yet.
pub const UNASSIGNED_PROMPT_ID: i64 = 0;

/// A reusable rewriting instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    /// Store-assigned identifier; [`UNASSIGNED_PROMPT_ID`] for new records.
    pub id: i64,
    /// Zero-based position within the owning list.
    pub position: usize,
    /// Display name.
    pub name: String,
    /// Prompt body sent to the rewording model.
    pub prompt: String,
    /// Whether the prompt only applies to selected text.
    pub requires_selection: bool,
    /// Whether the prompt runs automatically after transcription.
    pub auto_apply: bool,
}

impl PromptRecord {
    /// Create a record that the prompt store has not seen yet.
    pub fn new_unassigned(
        name: impl Into<String>,
        prompt: impl Into<String>,
        requires_selection: bool,
        auto_apply: bool,
    ) -> Self {
        Self {
            id: UNASSIGNED_PROMPT_ID,
            position: 0,
            name: name.into(),
            prompt: prompt.into(),
            requires_selection,
            auto_apply,
        }
    }

    /// Whether the store still has to assign an identifier.
    #[inline]
    pub fn is_unassigned(&self) -> bool {
        self.id == UNASSIGNED_PROMPT_ID
    }

    /// Compare the fields that survive an export/import cycle.
    pub fn same_content(&self, other: &Self) -> bool {
        self.name == other.name
            && self.prompt == other.prompt
            && self.requires_selection == other.requires_selection
            && self.auto_apply == other.auto_apply
    }
}

/// Ordered prompt records.
///
/// The sequence order is authoritative: every constructor rewrites each
/// record's `position` to its index, ignoring whatever value it carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptList(Vec<PromptRecord>);

impl PromptList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end, assigning its position.
    pub fn push(&mut self, mut record: PromptRecord) {
        record.position = self.0.len();
        self.0.push(record);
    }

    /// Consume the list, returning the records.
    pub fn into_vec(self) -> Vec<PromptRecord> {
        self.0
    }
}

impl From<Vec<PromptRecord>> for PromptList {
    fn from(records: Vec<PromptRecord>) -> Self {
        records.into_iter().collect()
    }
}

impl FromIterator<PromptRecord> for PromptList {
    fn from_iter<I: IntoIterator<Item = PromptRecord>>(iter: I) -> Self {
        let mut list = Self::new();
        for record in iter {
            list.push(record);
        }
        list
    }
}

impl Deref for PromptList {
    type Target = [PromptRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for PromptList {
    type Item = PromptRecord;
    type IntoIter = std::vec::IntoIter<PromptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PromptList {
    type Item = &'a PromptRecord;
    type IntoIter = std::slice::Iter<'a, PromptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

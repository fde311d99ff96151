//! Local list state.
//!
//! `RecordListState` is the explicit state container behind the list screen:
//! the local cache of remote rows, the pending selection for updates, and the
//! draft of the "add" form. Every transition is a plain synchronous method so
//! that callers can reconcile after a remote call without touching I/O.

use super::model::{PendingSelection, Record, RecordFields, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordListState {
    /// Cached rows in remote fetch order.
    records: Vec<Record>,
    selection: Option<PendingSelection>,
    draft: RecordFields,
}

impl RecordListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state whose cache already holds `records`.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn selection(&self) -> Option<&PendingSelection> {
        self.selection.as_ref()
    }

    pub fn draft(&self) -> &RecordFields {
        &self.draft
    }

    // ============================================================================
    // Cache transitions
    // ============================================================================

    /// Replaces the cache wholesale with a fresh listing.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Appends rows echoed back by an insert.
    pub fn append(&mut self, records: Vec<Record>) {
        self.records.extend(records);
    }

    /// Removes every row with the given key.
    ///
    /// Returns `true` if at least one row was removed.
    pub fn remove(&mut self, id: &RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        self.records.len() != before
    }

    /// Overwrites the attributes of the row with the given key.
    ///
    /// Returns `true` if a row matched.
    pub fn patch(&mut self, id: &RecordId, fields: &RecordFields) -> bool {
        let mut matched = false;
        for record in self.records.iter_mut().filter(|record| &record.id == id) {
            record.apply(fields);
            matched = true;
        }
        matched
    }

    // ============================================================================
    // Pending selection transitions
    // ============================================================================

    /// Targets `record` for update, seeding the edit buffer with its fields.
    pub fn select(&mut self, record: &Record) {
        self.selection = Some(PendingSelection::from_record(record));
    }

    /// Edits the selected full name. Returns `false` when nothing is selected.
    pub fn edit_selection_full_name(&mut self, full_name: impl Into<String>) -> bool {
        match self.selection.as_mut() {
            Some(selection) => {
                selection.full_name = full_name.into();
                true
            }
            None => false,
        }
    }

    /// Edits the selected gender. Returns `false` when nothing is selected.
    pub fn edit_selection_gender(&mut self, gender: impl Into<String>) -> bool {
        match self.selection.as_mut() {
            Some(selection) => {
                selection.gender = gender.into();
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // ============================================================================
    // Create draft transitions
    // ============================================================================

    pub fn set_draft_full_name(&mut self, full_name: impl Into<String>) {
        self.draft.full_name = full_name.into();
    }

    pub fn set_draft_gender(&mut self, gender: impl Into<String>) {
        self.draft.gender = gender.into();
    }
}

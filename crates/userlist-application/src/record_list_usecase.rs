//! Record list use case.
//!
//! `RecordListUseCase` keeps the local list in step with the remote table.
//! Each operation is one remote call followed by a reconcile step on
//! `RecordListState`:
//!
//! - Load replaces the cache wholesale
//! - Create appends the rows the remote side echoes back
//! - Delete removes the key locally once the remote side acknowledges it
//! - Update checks that the remote side reported an affected row, then
//!   patches the cache and clears the pending selection
//!
//! Operations do not serialize against each other. The state lock is only
//! held while reconciling, never across a remote call, so when two calls
//! race on one key the response that arrives last decides the cache.

use std::sync::Arc;
use tokio::sync::RwLock;
use userlist_core::error::{Result, UserListError};
use userlist_core::notice::{Notice, Notifier};
use userlist_core::record::{Record, RecordFields, RecordId, RecordListState, RecordRepository};

pub const DELETE_SUCCEEDED: &str = "User deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete user";
pub const UPDATE_SUCCEEDED: &str = "User updated successfully";
pub const UPDATE_FAILED: &str = "An unexpected error occurred. Please try again later.";
pub const SELECTION_REQUIRED: &str = "Please select a user to update";

/// Local Record Cache Synchronizer.
pub struct RecordListUseCase {
    repository: Arc<dyn RecordRepository>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<RecordListState>,
}

impl RecordListUseCase {
    /// Creates a use case with an empty cache.
    ///
    /// # Arguments
    ///
    /// * `repository` - The remote table
    /// * `notifier` - Where delete/update outcomes are reported to the user
    pub fn new(repository: Arc<dyn RecordRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(repository, notifier, RecordListState::new())
    }

    /// Creates a use case starting from an existing state.
    pub fn with_state(
        repository: Arc<dyn RecordRepository>,
        notifier: Arc<dyn Notifier>,
        state: RecordListState,
    ) -> Self {
        Self {
            repository,
            notifier,
            state: RwLock::new(state),
        }
    }

    /// Returns a snapshot of the whole list state for rendering.
    pub async fn state(&self) -> RecordListState {
        self.state.read().await.clone()
    }

    /// Returns a snapshot of the cached rows.
    pub async fn records(&self) -> Vec<Record> {
        self.state.read().await.records().to_vec()
    }

    // ============================================================================
    // Load
    // ============================================================================

    /// Fetches every row and replaces the cache.
    ///
    /// On failure the cache keeps its previous (stale) content and no notice
    /// is shown.
    ///
    /// # Returns
    ///
    /// The number of cached rows after the load.
    pub async fn load(&self) -> Result<usize> {
        match self.repository.list_all().await {
            Ok(records) => {
                let count = records.len();
                self.state.write().await.replace_all(records);
                tracing::info!("[RecordListUseCase] Loaded {} records", count);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("[RecordListUseCase] Error fetching users: {}", e);
                Err(e)
            }
        }
    }

    // ============================================================================
    // Create
    // ============================================================================

    /// Inserts a row and appends what the remote side returns.
    ///
    /// Failures are logged only; no notice is shown.
    pub async fn create(&self, fields: RecordFields) -> Result<Vec<Record>> {
        let inserted = match self.repository.insert(&fields).await {
            Ok(inserted) => inserted,
            Err(e) => {
                tracing::error!("[RecordListUseCase] Error creating user: {}", e);
                return Err(e);
            }
        };

        if inserted.is_empty() {
            tracing::info!(
                "[RecordListUseCase] User created; remote returned no row, it will appear on next load"
            );
        } else {
            tracing::info!(
                "[RecordListUseCase] User created successfully: {}",
                inserted
                    .iter()
                    .map(|r| r.id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.state.write().await.append(inserted.clone());
        }

        Ok(inserted)
    }

    /// Creates a row from the "add" form draft. The draft is kept as typed.
    pub async fn submit_draft(&self) -> Result<Vec<Record>> {
        let fields = self.state.read().await.draft().clone();
        self.create(fields).await
    }

    pub async fn set_draft_full_name(&self, full_name: impl Into<String>) {
        self.state.write().await.set_draft_full_name(full_name);
    }

    pub async fn set_draft_gender(&self, gender: impl Into<String>) {
        self.state.write().await.set_draft_gender(gender);
    }

    // ============================================================================
    // Delete
    // ============================================================================

    /// Deletes a row remotely, then drops it from the cache.
    ///
    /// Emits a success notice, or an error notice with the cache unchanged.
    pub async fn delete(&self, id: &RecordId) -> Result<()> {
        if let Err(e) = self.repository.delete(id).await {
            tracing::error!("[RecordListUseCase] Error deleting user {}: {}", id, e);
            self.notifier.notify(Notice::error(DELETE_FAILED));
            return Err(e);
        }

        let removed = self.state.write().await.remove(id);
        if !removed {
            tracing::debug!("[RecordListUseCase] Deleted user {} was not cached", id);
        }
        tracing::info!("[RecordListUseCase] Deleted user {}", id);
        self.notifier.notify(Notice::success(DELETE_SUCCEEDED));
        Ok(())
    }

    // ============================================================================
    // Selection & Update
    // ============================================================================

    /// Targets a cached row for update, copying its fields into the buffer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the key is not cached; the selection is untouched.
    pub async fn select(&self, id: &RecordId) -> Result<()> {
        let mut state = self.state.write().await;
        let record = state
            .find(id)
            .cloned()
            .ok_or_else(|| UserListError::not_found("record", id.to_string()))?;
        state.select(&record);
        Ok(())
    }

    /// Edits the full name in the pending selection.
    pub async fn edit_selection_full_name(&self, full_name: impl Into<String>) -> Result<()> {
        if self.state.write().await.edit_selection_full_name(full_name) {
            Ok(())
        } else {
            Err(UserListError::validation(SELECTION_REQUIRED))
        }
    }

    /// Edits the gender in the pending selection.
    pub async fn edit_selection_gender(&self, gender: impl Into<String>) -> Result<()> {
        if self.state.write().await.edit_selection_gender(gender) {
            Ok(())
        } else {
            Err(UserListError::validation(SELECTION_REQUIRED))
        }
    }

    pub async fn clear_selection(&self) {
        self.state.write().await.clear_selection();
    }

    /// Submits the pending selection as an update.
    ///
    /// Without a selection, or with an empty field, no remote call is made
    /// and a validation notice is shown.
    pub async fn submit_selection(&self) -> Result<()> {
        let selection = self.state.read().await.selection().cloned();

        let selection = match selection {
            Some(selection) if selection.fields().is_complete() => selection,
            _ => {
                tracing::debug!("[RecordListUseCase] Update rejected: incomplete selection");
                self.notifier.notify(Notice::error(SELECTION_REQUIRED));
                return Err(UserListError::validation(SELECTION_REQUIRED));
            }
        };

        self.update(&selection.id, selection.fields()).await
    }

    /// Replaces both attributes of a row remotely, then locally.
    ///
    /// The remote response must report at least one updated row. On success
    /// the cache is patched from the returned rows, a success notice is shown
    /// and the pending selection is cleared. On failure cache and selection
    /// are untouched and an error notice is shown.
    pub async fn update(&self, id: &RecordId, fields: RecordFields) -> Result<()> {
        let updated = match self.repository.update(id, &fields).await {
            Ok(updated) if updated.is_empty() => {
                let e = UserListError::not_found("record", id.to_string());
                tracing::error!("[RecordListUseCase] Update matched no remote row: {}", e);
                self.notifier.notify(Notice::error(UPDATE_FAILED));
                return Err(e);
            }
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!("[RecordListUseCase] Unexpected error updating user {}: {}", id, e);
                self.notifier.notify(Notice::error(UPDATE_FAILED));
                return Err(e);
            }
        };

        {
            let mut state = self.state.write().await;
            for record in &updated {
                state.patch(&record.id, &record.fields());
            }
            state.clear_selection();
        }

        tracing::info!("[RecordListUseCase] Updated user {}", id);
        self.notifier.notify(Notice::success(UPDATE_SUCCEEDED));
        Ok(())
    }
}

//! Record repository trait.
//!
//! Defines the interface to the remote table that the list mirrors.

use super::model::{Record, RecordFields, RecordId};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository over the remote record table.
///
/// This trait is the whole contract with the remote collaborator: four
/// operations, no query language, no transactions. Implementations decide
/// how the call travels (REST, in-memory, ...).
///
/// # Implementation Notes
///
/// Implementations should:
/// - Map transport and service failures to `UserListError::RemoteRequest`
/// - Return rows in the order the remote side delivers them
/// - Never retry on their own
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Lists every row of the table.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: All rows, in remote order
    /// - `Err(_)`: The remote call failed
    async fn list_all(&self) -> Result<Vec<Record>>;

    /// Inserts one row. The key is assigned remotely.
    ///
    /// # Arguments
    ///
    /// * `fields` - The attributes of the new row
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: The inserted row(s) as echoed by the remote side
    /// - `Err(_)`: The remote call failed
    async fn insert(&self, fields: &RecordFields) -> Result<Vec<Record>>;

    /// Replaces both attributes of the row with the given key.
    ///
    /// # Arguments
    ///
    /// * `id` - The key of the row to update
    /// * `fields` - The new attributes
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Record>)`: The rows the remote side reports as updated
    ///   (empty when no row matched the key)
    /// - `Err(_)`: The remote call failed
    async fn update(&self, id: &RecordId, fields: &RecordFields) -> Result<Vec<Record>>;

    /// Deletes the row with the given key.
    ///
    /// # Arguments
    ///
    /// * `id` - The key of the row to delete
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The remote side acknowledged the delete
    /// - `Err(_)`: The remote call failed
    async fn delete(&self, id: &RecordId) -> Result<()>;
}

//! Record domain module.
//!
//! This module contains the record domain models, the repository interface to
//! the remote table, and the local list state that mirrors it.
//!
//! # Module Structure
//!
//! - `model`: Core record domain models (`Record`, `RecordId`, `RecordFields`,
//!   `PendingSelection`)
//! - `repository`: Record repository trait for the remote table
//! - `state`: `RecordListState`, the local cache with its transitions
//!
//! # Usage
//!
//! ```ignore
//! use userlist_core::record::{Record, RecordFields, RecordId};
//! use userlist_core::record::{RecordListState, RecordRepository};
//! ```

mod model;
pub mod repository;
mod state;

// Re-export public API
pub use model::{PendingSelection, Record, RecordFields, RecordId};
pub use repository::RecordRepository;
pub use state::RecordListState;

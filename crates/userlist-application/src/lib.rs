//! Application layer for userlist.
//!
//! This crate provides the use case that coordinates the remote table and the
//! local list state.

pub mod record_list_usecase;


pub use record_list_usecase::RecordListUseCase;

pub mod config_service;
pub mod dto;
pub mod memory_repository;
pub mod notifier;
pub mod paths;
pub mod postgrest_repository;

pub use crate::config_service::ConfigService;
pub use crate::memory_repository::InMemoryRecordRepository;
pub use crate::notifier::ChannelNotifier;
pub use crate::postgrest_repository::PostgrestRecordRepository;

//! Storage crate: user and message persistence for the relay bot.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, UserRecord
//! - [`repository`] – MessageStore trait (the capability handlers receive)
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_repo;
mod models;
mod repository;
mod sqlite_pool;

#[cfg(test)]
mod message_repo_test;

pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use models::{MessageRecord, UserRecord};
pub use repository::MessageStore;
pub use sqlite_pool::SqlitePoolManager;

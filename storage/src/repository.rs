//! The store capability handed to every handler.
//!
//! Handlers only see `Arc<dyn MessageStore>`; production uses [`crate::MessageRepository`],
//! tests may substitute any other implementation.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{MessageRecord, UserRecord};

/// CRUD over users and per-chat messages. Failures are never retried here.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts the user if absent, otherwise updates names and handle. Idempotent.
    async fn upsert_user(&self, user: &UserRecord) -> Result<(), StorageError>;

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError>;

    /// Appends an immutable message and returns its id.
    async fn save_message(&self, chat_id: i64, user_id: i64, text: &str)
        -> Result<i64, StorageError>;

    /// Every message of the chat, oldest first.
    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<MessageRecord>, StorageError>;

    /// The newest `limit` messages of the chat, returned oldest first.
    async fn list_recent(&self, chat_id: i64, limit: i64)
        -> Result<Vec<MessageRecord>, StorageError>;

    async fn count(&self, chat_id: i64) -> Result<i64, StorageError>;

    /// Deletes by id; a missing id is not an error.
    async fn delete_by_id(&self, message_id: i64) -> Result<(), StorageError>;

    /// Deletes every message of the chat and returns how many rows went away.
    async fn delete_all_by_chat(&self, chat_id: i64) -> Result<u64, StorageError>;
}

//! Message repository: persistence and queries for users and messages.
//!
//! Uses SqlitePoolManager and the models (MessageRecord, UserRecord).
//! External: SQLite via sqlx; callers go through the [`MessageStore`] trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{MessageRecord, UserRecord};
use crate::repository::MessageStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    /// Opens (or creates) the database and makes sure the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT,
                username TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                chat_id INTEGER NOT NULL,
                user_id INTEGER NOT NULL,
                text TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages(chat_id)")
            .execute(pool)
            .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Releases the storage connection; used on shutdown.
    pub async fn close(&self) {
        self.pool_manager.close().await;
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn upsert_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, username, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                username = excluded.username
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(user.created_at)
        .execute(pool)
        .await?;

        debug!(user_id = user.id, "Upserted user");
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, username, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    async fn save_message(
        &self,
        chat_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            "INSERT INTO messages (chat_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_id)
        .bind(user_id)
        .bind(text)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(message_id = id, chat_id, user_id, "Saved message");
        Ok(id)
    }

    async fn list_by_chat(&self, chat_id: i64) -> Result<Vec<MessageRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, chat_id, user_id, text, created_at
            FROM messages
            WHERE chat_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await?;

        info!(chat_id, count = messages.len(), "Retrieved messages for chat");
        Ok(messages)
    }

    async fn list_recent(
        &self,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<MessageRecord>, StorageError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let pool = self.pool_manager.pool();

        let mut messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, chat_id, user_id, text, created_at
            FROM messages
            WHERE chat_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        // newest-first from the query; callers get chronological order
        messages.reverse();

        info!(
            chat_id,
            limit,
            count = messages.len(),
            "Retrieved recent messages for chat"
        );
        Ok(messages)
    }

    async fn count(&self, chat_id: i64) -> Result<i64, StorageError> {
        let pool = self.pool_manager.pool();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    async fn delete_by_id(&self, message_id: i64) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(message_id)
            .execute(pool)
            .await?;

        info!(
            message_id,
            rows_affected = result.rows_affected(),
            "Deleted message"
        );
        Ok(())
    }

    async fn delete_all_by_chat(&self, chat_id: i64) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM messages WHERE chat_id = ?")
            .bind(chat_id)
            .execute(pool)
            .await?;

        info!(
            chat_id,
            rows_affected = result.rows_affected(),
            "Deleted all messages for chat"
        );
        Ok(result.rows_affected())
    }
}

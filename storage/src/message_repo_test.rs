//! Unit tests for MessageRepository.
//!
//! Covers schema creation, user upsert and the `sqlite:` URL form of the database location.

use tempfile::TempDir;

use crate::message_repo::MessageRepository;
use crate::models::UserRecord;
use crate::repository::MessageStore;

async fn setup_repo() -> (TempDir, MessageRepository) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("messages.db");
    let repo = MessageRepository::new(path.to_str().expect("temp path is utf-8"))
        .await
        .expect("Failed to create repository");
    (dir, repo)
}

#[tokio::test]
async fn test_schema_creation_is_idempotent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("messages.db");
    let path = path.to_str().expect("temp path is utf-8");

    let first = MessageRepository::new(path)
        .await
        .expect("Failed to create repository");
    let id = first
        .save_message(1, 10, "kept across reopen")
        .await
        .expect("Failed to save message");
    first.close().await;

    let second = MessageRepository::new(path)
        .await
        .expect("Reopening an existing database must succeed");
    let messages = second.list_by_chat(1).await.expect("Failed to list");

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, id);
}

#[tokio::test]
async fn test_sqlite_url_location() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}/url.db", dir.path().display());

    let repo = MessageRepository::new(&url)
        .await
        .expect("Failed to create repository from URL");
    repo.save_message(5, 6, "hello").await.expect("Failed to save");

    assert_eq!(repo.count(5).await.expect("Failed to count"), 1);
    assert!(dir.path().join("url.db").exists());
}

#[tokio::test]
async fn test_upsert_user_inserts_then_updates() {
    let (_dir, repo) = setup_repo().await;

    let user = UserRecord::new(42, "Ada", None, Some("ada".to_string()));
    repo.upsert_user(&user).await.expect("Failed to insert user");

    let stored = repo
        .get_user(42)
        .await
        .expect("Failed to get user")
        .expect("User must exist after upsert");
    assert_eq!(stored.first_name, "Ada");
    assert_eq!(stored.username.as_deref(), Some("ada"));
    assert!(stored.last_name.is_none());

    let renamed = UserRecord::new(
        42,
        "Ada",
        Some("Lovelace".to_string()),
        Some("countess".to_string()),
    );
    repo.upsert_user(&renamed).await.expect("Failed to update user");
    repo.upsert_user(&renamed).await.expect("Upsert must be idempotent");

    let updated = repo
        .get_user(42)
        .await
        .expect("Failed to get user")
        .expect("User must still exist");
    assert_eq!(updated.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(updated.username.as_deref(), Some("countess"));
    assert_eq!(updated.created_at, stored.created_at);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (_dir, repo) = setup_repo().await;

    let user = repo.get_user(999).await.expect("Failed to query");

    assert!(user.is_none());
}

#[tokio::test]
async fn test_list_recent_non_positive_limit() {
    let (_dir, repo) = setup_repo().await;
    repo.save_message(1, 1, "one").await.expect("Failed to save");

    assert!(repo.list_recent(1, 0).await.expect("Failed to list").is_empty());
    assert!(repo.list_recent(1, -3).await.expect("Failed to list").is_empty());
}

#[tokio::test]
async fn test_operations_fail_after_close() {
    let (_dir, repo) = setup_repo().await;
    repo.close().await;

    let result = repo.save_message(1, 1, "too late").await;

    assert!(result.is_err());
}

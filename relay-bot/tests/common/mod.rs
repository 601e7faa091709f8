//! Shared fixtures for relay-bot integration tests: a recording bot, a failing store, a temp
//! SQLite repository and message builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use relay_bot::{Bot, ButtonPress, Chat, InlineButton, Message, Result, User};
use storage::{MessageRecord, MessageRepository, MessageStore, StorageError, UserRecord};
use tempfile::TempDir;

/// One outbound call made through [`MockBot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Text {
        chat_id: i64,
        text: String,
    },
    Buttons {
        chat_id: i64,
        text: String,
        buttons: Vec<InlineButton>,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
    },
    ClearButtons {
        chat_id: i64,
        message_id: String,
    },
    Answer {
        press_id: String,
    },
}

/// Bot that records every call instead of talking to Telegram.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<Outbound>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Outbound> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts of plain `send_message` calls, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Outbound) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(Outbound::Text {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_with_buttons(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[InlineButton],
    ) -> Result<()> {
        self.record(Outbound::Buttons {
            chat_id: chat.id,
            text: text.to_string(),
            buttons: buttons.to_vec(),
        });
        Ok(())
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(Outbound::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn clear_buttons(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.record(Outbound::ClearButtons {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn answer_button(&self, press_id: &str) -> Result<()> {
        self.record(Outbound::Answer {
            press_id: press_id.to_string(),
        });
        Ok(())
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

fn broken<T>() -> std::result::Result<T, StorageError> {
    Err(StorageError::Database("database is locked".to_string()))
}

#[async_trait]
impl MessageStore for FailingStore {
    async fn upsert_user(&self, _user: &UserRecord) -> std::result::Result<(), StorageError> {
        broken()
    }

    async fn get_user(
        &self,
        _user_id: i64,
    ) -> std::result::Result<Option<UserRecord>, StorageError> {
        broken()
    }

    async fn save_message(
        &self,
        _chat_id: i64,
        _user_id: i64,
        _text: &str,
    ) -> std::result::Result<i64, StorageError> {
        broken()
    }

    async fn list_by_chat(
        &self,
        _chat_id: i64,
    ) -> std::result::Result<Vec<MessageRecord>, StorageError> {
        broken()
    }

    async fn list_recent(
        &self,
        _chat_id: i64,
        _limit: i64,
    ) -> std::result::Result<Vec<MessageRecord>, StorageError> {
        broken()
    }

    async fn count(&self, _chat_id: i64) -> std::result::Result<i64, StorageError> {
        broken()
    }

    async fn delete_by_id(&self, _message_id: i64) -> std::result::Result<(), StorageError> {
        broken()
    }

    async fn delete_all_by_chat(&self, _chat_id: i64) -> std::result::Result<u64, StorageError> {
        broken()
    }
}

/// Opens a repository in a fresh temp dir; keep the dir alive for the test.
pub async fn temp_repo() -> (TempDir, Arc<MessageRepository>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relay.db");
    let repo = MessageRepository::new(path.to_str().unwrap()).await.unwrap();
    (dir, Arc::new(repo))
}

pub fn chat(id: i64) -> Chat {
    Chat {
        id,
        chat_type: "private".to_string(),
    }
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some("alice".to_string()),
        first_name: Some("Alice".to_string()),
        last_name: None,
    }
}

pub fn text_message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: user(42),
        chat: chat(chat_id),
        content: content.to_string(),
        created_at: Utc::now(),
    }
}

pub fn button_press(chat_id: i64, action: &str) -> ButtonPress {
    ButtonPress {
        id: "press-1".to_string(),
        user: user(42),
        chat: chat(chat_id),
        message_id: "77".to_string(),
        action: action.to_string(),
    }
}

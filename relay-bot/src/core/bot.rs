//! Bot abstraction for the outbound side of the transport.
//!
//! [`Bot`] is transport-agnostic; [`crate::telegram::TelegramBotAdapter`] implements it via teloxide
//! and tests substitute a recording mock.

use async_trait::async_trait;

use crate::core::error::{BotError, Result};
use crate::core::types::{Chat, InlineButton};

/// Outbound primitives the handlers need. `message_id` is the transport's id as a string.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends text to the chat; simple emphasis is rendered (MarkdownV2).
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends text with one row of inline buttons.
    async fn send_with_buttons(&self, chat: &Chat, text: &str, buttons: &[InlineButton])
        -> Result<()>;
    /// Replaces the text of an already-sent message; its buttons are dropped.
    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()>;
    /// Removes the inline buttons from an already-sent message.
    async fn clear_buttons(&self, chat: &Chat, message_id: &str) -> Result<()>;
    /// Acknowledges a button press so the client stops showing it as pending.
    async fn answer_button(&self, press_id: &str) -> Result<()>;
}

/// Parses a message id string into the transport's i32 id.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| BotError::Transport(format!("Invalid message_id: {}", s)))
}

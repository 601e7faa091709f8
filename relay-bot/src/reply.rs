//! Outbound side of the reply formatter: sends rendered text through a [`Bot`], splitting long
//! units and pausing between consecutive sends to stay under the transport's rate limits.
//!
//! Send failures are logged and dropped; nothing here retries.

use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::core::{Bot, Chat};
use crate::format::{split_markdown, MAX_MESSAGE_LEN};

/// Pause between the units of one split reply.
pub const SPLIT_PAUSE: Duration = Duration::from_millis(50);

/// Pause between `/all` pages.
pub const PAGE_PAUSE: Duration = Duration::from_millis(100);

/// Sends `text`, split into units of at most [`MAX_MESSAGE_LEN`] characters that each parse as
/// MarkdownV2 on their own.
pub async fn send_reply(bot: &dyn Bot, chat: &Chat, text: &str) {
    let parts = split_markdown(text, MAX_MESSAGE_LEN);
    let total = parts.len();

    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            sleep(SPLIT_PAUSE).await;
        }
        if let Err(e) = bot.send_message(chat, part).await {
            warn!(chat_id = chat.id, part = i + 1, total, error = %e, "Failed to send reply");
        }
    }
}

/// Sends each page as its own reply, pausing between pages.
pub async fn send_pages(bot: &dyn Bot, chat: &Chat, pages: &[String]) {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            sleep(PAGE_PAUSE).await;
        }
        send_reply(bot, chat, page).await;
    }
}

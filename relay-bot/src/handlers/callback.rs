//! Button-press handling for the `/clear` confirmation prompt.

use std::sync::Arc;

use storage::MessageStore;
use tracing::{error, info, instrument, warn};

use crate::commands::CallbackAction;
use crate::core::{Bot, ButtonPress, Result};
use crate::format;
use crate::reply::send_reply;

/// Acknowledges every press first, then acts on the [`CallbackAction`] it carries.
#[derive(Clone)]
pub struct CallbackHandler {
    store: Arc<dyn MessageStore>,
    bot: Arc<dyn Bot>,
}

impl CallbackHandler {
    pub fn new(store: Arc<dyn MessageStore>, bot: Arc<dyn Bot>) -> Self {
        Self { store, bot }
    }

    #[instrument(skip(self, press), fields(chat_id = press.chat.id, action = %press.action))]
    pub async fn handle(&self, press: &ButtonPress) -> Result<()> {
        if let Err(e) = self.bot.answer_button(&press.id).await {
            warn!(error = %e, "Failed to answer button press");
        }

        let chat = &press.chat;
        match CallbackAction::parse(&press.action) {
            CallbackAction::ClearConfirm => match self.store.delete_all_by_chat(chat.id).await {
                Ok(removed) => {
                    info!(chat_id = chat.id, removed, "Chat cleared");
                    if let Err(e) = self.bot.clear_buttons(chat, &press.message_id).await {
                        warn!(error = %e, "Failed to remove confirmation buttons");
                    }
                    send_reply(self.bot.as_ref(), chat, &format::cleared_text()).await;
                }
                Err(e) => {
                    error!(error = %e, chat_id = chat.id, "Failed to clear chat");
                    send_reply(
                        self.bot.as_ref(),
                        chat,
                        &format::failure_text("deleting messages"),
                    )
                    .await;
                }
            },
            CallbackAction::ClearCancel => {
                info!(chat_id = chat.id, "Clear cancelled");
                if let Err(e) = self
                    .bot
                    .edit_message(chat, &press.message_id, &format::clear_cancelled_text())
                    .await
                {
                    warn!(error = %e, "Failed to replace confirmation prompt");
                }
            }
            CallbackAction::Unknown(token) => {
                warn!(chat_id = chat.id, action = %token, "Unknown button action");
            }
        }
        Ok(())
    }
}

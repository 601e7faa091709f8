//! Handler that turns a text message into either a command or stored content.

use std::sync::Arc;

use async_trait::async_trait;
use storage::MessageStore;
use tracing::{error, info, instrument, warn};

use crate::commands::{CallbackAction, Command, DeleteArg, DEFAULT_GET_LIMIT};
use crate::core::{Bot, Chat, Handler, HandlerResponse, InlineButton, Message, Result};
use crate::format;
use crate::reply::{send_pages, send_reply};

/// Routes commands through an exhaustive match over [`Command`]; any other text is saved and
/// acknowledged. Storage failures end as a short notice to the chat, never as a chain error.
#[derive(Clone)]
pub struct RelayHandler {
    store: Arc<dyn MessageStore>,
    bot: Arc<dyn Bot>,
}

impl RelayHandler {
    pub fn new(store: Arc<dyn MessageStore>, bot: Arc<dyn Bot>) -> Self {
        Self { store, bot }
    }

    async fn reply(&self, chat: &Chat, text: &str) {
        send_reply(self.bot.as_ref(), chat, text).await;
    }

    async fn save_text(&self, message: &Message) {
        let chat = &message.chat;
        match self
            .store
            .save_message(chat.id, message.user.id, &message.content)
            .await
        {
            Ok(id) => {
                info!(chat_id = chat.id, message_id = id, "Stored message");
                self.reply(chat, &format::saved_ack(&message.content)).await;
            }
            Err(e) => {
                error!(error = %e, chat_id = chat.id, "Failed to save message");
                self.reply(chat, &format::failure_text("saving the message"))
                    .await;
            }
        }
    }

    async fn run_command(&self, message: &Message, command: Command) {
        let chat = &message.chat;
        info!(chat_id = chat.id, command = ?command, "Running command");

        match command {
            Command::Start => {
                self.reply(chat, &format::start_text(message.user.display_name()))
                    .await;
            }
            Command::Help => self.reply(chat, &format::help_text()).await,
            Command::Get(limit) => {
                self.get_recent(chat, limit.unwrap_or(DEFAULT_GET_LIMIT))
                    .await
            }
            Command::All => self.get_all(chat).await,
            Command::Count => self.count(chat).await,
            Command::Delete(arg) => self.delete(chat, arg).await,
            Command::Clear => self.ask_clear(chat).await,
            Command::Unknown(token) => {
                info!(chat_id = chat.id, token = %token, "Unknown command");
                self.reply(chat, &format::unknown_command_text()).await;
            }
        }
    }

    async fn get_recent(&self, chat: &Chat, limit: usize) {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        match self.store.list_recent(chat.id, limit).await {
            Ok(records) if records.is_empty() => self.reply(chat, &format::empty_text()).await,
            Ok(records) => self.reply(chat, &format::render_recent(&records)).await,
            Err(e) => {
                error!(error = %e, chat_id = chat.id, "Failed to get recent messages");
                self.reply(chat, &format::failure_text("getting messages"))
                    .await;
            }
        }
    }

    async fn get_all(&self, chat: &Chat) {
        let records = match self.store.list_by_chat(chat.id).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, chat_id = chat.id, "Failed to get messages");
                self.reply(chat, &format::failure_text("getting messages"))
                    .await;
                return;
            }
        };

        if records.is_empty() {
            self.reply(chat, &format::empty_text()).await;
            return;
        }

        let pages = format::paginate(&records, format::PAGE_SIZE);
        let rendered: Vec<String> = pages
            .iter()
            .enumerate()
            .map(|(i, page)| format::render_page(page, i, pages.len(), format::PAGE_SIZE))
            .collect();
        send_pages(self.bot.as_ref(), chat, &rendered).await;
    }

    async fn count(&self, chat: &Chat) {
        match self.store.count(chat.id).await {
            Ok(count) => self.reply(chat, &format::count_text(count)).await,
            Err(e) => {
                error!(error = %e, chat_id = chat.id, "Failed to count messages");
                self.reply(chat, &format::failure_text("counting messages"))
                    .await;
            }
        }
    }

    async fn delete(&self, chat: &Chat, arg: DeleteArg) {
        let message_id = match arg {
            DeleteArg::Id(id) => id,
            DeleteArg::Missing => {
                self.reply(chat, &format::delete_usage_text()).await;
                return;
            }
            DeleteArg::Invalid(raw) => {
                info!(chat_id = chat.id, arg = %raw, "Invalid message id");
                self.reply(chat, &format::invalid_id_text()).await;
                return;
            }
        };

        match self.store.delete_by_id(message_id).await {
            Ok(()) => self.reply(chat, &format::deleted_text(message_id)).await,
            Err(e) => {
                error!(error = %e, chat_id = chat.id, message_id, "Failed to delete message");
                self.reply(chat, &format::failure_text("deleting the message"))
                    .await;
            }
        }
    }

    /// Only asks; deletion happens when the confirm button comes back.
    async fn ask_clear(&self, chat: &Chat) {
        let buttons = [
            InlineButton::new("✅ Yes, delete all", CallbackAction::ClearConfirm.as_token()),
            InlineButton::new("❌ No, cancel", CallbackAction::ClearCancel.as_token()),
        ];
        if let Err(e) = self
            .bot
            .send_with_buttons(chat, &format::clear_prompt_text(), &buttons)
            .await
        {
            warn!(chat_id = chat.id, error = %e, "Failed to send clear confirmation");
        }
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match Command::parse(&message.content) {
            Some(command) => self.run_command(message, command).await,
            None => self.save_text(message).await,
        }
        Ok(HandlerResponse::Stop)
    }
}

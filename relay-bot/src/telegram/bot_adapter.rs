//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code sends messages via
//! Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode,
};
use teloxide::RequestError;
use tracing::warn;

use crate::core::{parse_message_id, Bot as CoreBot, BotError, Chat, InlineButton, Result};
use crate::format::strip_markdown;

/// True when Telegram rejected the text because its MarkdownV2 entities do not parse.
pub fn is_markdown_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

fn transport_error(e: RequestError) -> BotError {
    BotError::Transport(e.to_string())
}

fn keyboard(buttons: &[InlineButton]) -> InlineKeyboardMarkup {
    let row = buttons
        .iter()
        .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.clone()))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
///
/// Text goes out as MarkdownV2. When Telegram cannot parse it, a plain rendering is sent once more
/// without a parse mode so the reply still arrives.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    async fn send_markdown(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<()> {
        let mut req = self
            .bot
            .send_message(chat_id, text.to_string())
            .parse_mode(ParseMode::MarkdownV2);
        if let Some(kb) = markup.clone() {
            req = req.reply_markup(kb);
        }

        match req.await {
            Ok(_) => Ok(()),
            Err(e) if is_markdown_parse_error(&e) => {
                warn!(chat_id = chat_id.0, error = %e, "MarkdownV2 rejected, sending plain text");
                let mut plain = self.bot.send_message(chat_id, strip_markdown(text));
                if let Some(kb) = markup {
                    plain = plain.reply_markup(kb);
                }
                plain.await.map(|_| ()).map_err(transport_error)
            }
            Err(e) => Err(transport_error(e)),
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send_markdown(ChatId(chat.id), text, None).await
    }

    async fn send_with_buttons(
        &self,
        chat: &Chat,
        text: &str,
        buttons: &[InlineButton],
    ) -> Result<()> {
        self.send_markdown(ChatId(chat.id), text, Some(keyboard(buttons)))
            .await
    }

    async fn edit_message(&self, chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        let chat_id = ChatId(chat.id);
        let id = MessageId(parse_message_id(message_id)?);

        match self
            .bot
            .edit_message_text(chat_id, id, text.to_string())
            .parse_mode(ParseMode::MarkdownV2)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_markdown_parse_error(&e) => {
                warn!(chat_id = chat.id, error = %e, "MarkdownV2 rejected, editing as plain text");
                self.bot
                    .edit_message_text(chat_id, id, strip_markdown(text))
                    .await
                    .map(|_| ())
                    .map_err(transport_error)
            }
            Err(e) => Err(transport_error(e)),
        }
    }

    async fn clear_buttons(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = MessageId(parse_message_id(message_id)?);
        self.bot
            .edit_message_reply_markup(ChatId(chat.id), id)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn answer_button(&self, press_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(press_id.to_string()))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}

//! Conversions from teloxide types to core types.

use teloxide::types::{CallbackQuery, Chat as TelegramChat};

use crate::core::{
    ButtonPress, Chat, HandlerError, Message, ToCoreUpdate, ToCoreUser, Update, User,
};

/// teloxide user → core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// teloxide message → [`Update::Message`]. Messages without text are rejected.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreUpdate for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Result<Update, HandlerError> {
        let msg = self.0;
        let text = msg.text().ok_or(HandlerError::NoText)?;
        Ok(Update::Message(Message {
            id: msg.id.0.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: to_core_chat(&msg.chat),
            content: text.to_string(),
            created_at: msg.date,
        }))
    }
}

/// teloxide callback query → [`Update::ButtonPress`]. Presses on inline-mode messages have no
/// originating chat message and are rejected.
pub struct TelegramCallbackWrapper<'a>(pub &'a CallbackQuery);

impl<'a> ToCoreUpdate for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Result<Update, HandlerError> {
        let q = self.0;
        let origin = q.message.as_ref().ok_or(HandlerError::NoOrigin)?;
        Ok(Update::ButtonPress(ButtonPress {
            id: q.id.0.clone(),
            user: TelegramUserWrapper(&q.from).to_core(),
            chat: to_core_chat(origin.chat()),
            message_id: origin.id().0.to_string(),
            action: q.data.clone().unwrap_or_default(),
        }))
    }
}

fn to_core_chat(chat: &TelegramChat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

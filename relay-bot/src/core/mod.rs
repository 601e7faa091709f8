//! Core types and traits: Handler, Bot, Message, Update, error, logger.
//! Transport-agnostic; the teloxide layer lives in [`crate::telegram`].

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    ButtonPress, Chat, Handler, HandlerResponse, InlineButton, Message, ToCoreUpdate, ToCoreUser,
    Update, User,
};

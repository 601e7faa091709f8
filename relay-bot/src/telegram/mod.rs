//! Telegram framework layer: adapters, Bot implementation, client setup and the dispatcher runner.

mod adapters;
mod bot_adapter;
mod client;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{is_markdown_parse_error, TelegramBotAdapter};
pub use client::{create_bot, verify_credential};
pub use runner::{chat_key, run_dispatcher, schema, wait_for_shutdown_signal};

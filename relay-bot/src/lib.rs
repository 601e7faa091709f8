//! # Relay bot
//!
//! Telegram bot that stores chat messages in SQLite and replays them on command. Core types and
//! the handler chain are transport-agnostic; [`telegram`] holds the teloxide layer.

pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod format;
pub mod handlers;
pub mod reply;
pub mod runner;
pub mod telegram;

pub use chain::HandlerChain;
pub use cli::{load_config, Cli};
pub use commands::{CallbackAction, Command, DeleteArg};
pub use config::{BotConfig, ConfigOverrides};
pub use crate::core::{
    init_tracing, parse_message_id, Bot, BotError, ButtonPress, Chat, Handler, HandlerError,
    HandlerResponse, InlineButton, Message, Result, ToCoreUpdate, ToCoreUser, Update, User,
};
pub use dispatcher::UpdateDispatcher;
pub use handlers::{CallbackHandler, LoggingHandler, RelayHandler, UserSyncHandler};
pub use runner::run_bot;
pub use telegram::{
    run_dispatcher, TelegramBotAdapter, TelegramCallbackWrapper, TelegramMessageWrapper,
    TelegramUserWrapper,
};

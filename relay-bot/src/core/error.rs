//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] covers updates the bot cannot act on.

use storage::StorageError;
use thiserror::Error;

/// Top-level error for the relay bot.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Inbound updates that cannot be turned into a core [`crate::core::Update`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Button press without an originating message")]
    NoOrigin,
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;

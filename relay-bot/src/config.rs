//! Bot configuration loaded from environment variables, with optional CLI overrides.

use std::env;
use std::path::PathBuf;

use crate::core::{BotError, Result};

pub const DEFAULT_DATABASE_URL: &str = "messages.db";
pub const DEFAULT_LOG_FILE: &str = "logs/relay-bot.log";

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub token: Option<String>,
    pub database_url: Option<String>,
}

/// Runtime configuration for the relay bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN, or BOT_TOKEN
    pub bot_token: String,
    /// DATABASE_URL: a file path or a `sqlite:` URL
    pub database_url: String,
    /// LOG_FILE
    pub log_file: PathBuf,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL; points the client at another Bot API server
    pub telegram_api_url: Option<String>,
}

impl BotConfig {
    /// Loads from the environment. A token is required, from `overrides` or the environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let bot_token = overrides
            .token
            .or_else(|| non_empty_var("TELEGRAM_BOT_TOKEN"))
            .or_else(|| non_empty_var("BOT_TOKEN"))
            .ok_or_else(|| {
                BotError::Config("TELEGRAM_BOT_TOKEN (or BOT_TOKEN) is not set".to_string())
            })?;
        let database_url = overrides
            .database_url
            .or_else(|| non_empty_var("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let log_file = non_empty_var("LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        let telegram_api_url =
            non_empty_var("TELEGRAM_API_URL").or_else(|| non_empty_var("TELOXIDE_API_URL"));

        Ok(Self {
            bot_token,
            database_url,
            log_file,
            telegram_api_url,
        })
    }

    /// Checks values that can be wrong even when present.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(BotError::Config("bot token is empty".to_string()));
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                return Err(BotError::Config(format!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                )));
            }
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

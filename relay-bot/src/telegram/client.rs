//! Building the teloxide client and checking its credential.

use teloxide::prelude::*;
use teloxide::types::Me;
use tracing::info;

use crate::config::BotConfig;
use crate::core::{BotError, Result};

/// Creates the teloxide Bot; `telegram_api_url` redirects requests (a local Bot API server or a
/// mock in tests).
pub fn create_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url {
        Some(ref url_str) => {
            let url = reqwest::Url::parse(url_str).map_err(|e| {
                BotError::Config(format!("invalid Telegram API URL {}: {}", url_str, e))
            })?;
            info!(api_url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Calls getMe; a rejected token surfaces here rather than on the first update.
pub async fn verify_credential(bot: &teloxide::Bot) -> Result<Me> {
    let me = bot
        .get_me()
        .await
        .map_err(|e| BotError::Transport(format!("credential check failed: {}", e)))?;
    info!(
        bot_id = me.user.id.0,
        username = %me.user.username.as_deref().unwrap_or("unknown"),
        "Bot credential verified"
    );
    Ok(me)
}

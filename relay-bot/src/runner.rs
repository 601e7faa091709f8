//! Process entry: logging, storage, Telegram client, dispatcher.

use std::sync::Arc;

use storage::{MessageRepository, MessageStore, StorageError};
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, BotError, Result};
use crate::dispatcher::UpdateDispatcher;
use crate::telegram::{create_bot, run_dispatcher, verify_credential, TelegramBotAdapter};

/// Main entry: init logging, open the store, verify the bot token, then dispatch until a shutdown
/// signal. Storage and credential failures are fatal.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file).map_err(|e| BotError::Config(e.to_string()))?;

    info!(database_url = %config.database_url, "Initializing bot");

    let repo = MessageRepository::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(error = %e, database_url = %config.database_url, "Failed to open message store");
            BotError::Storage(StorageError::from(e))
        })?;
    let repo = Arc::new(repo);

    let result = serve(&config, repo.clone()).await;

    repo.close().await;
    info!("Message store closed");
    result
}

async fn serve(config: &BotConfig, store: Arc<MessageRepository>) -> Result<()> {
    let teloxide_bot = create_bot(config)?;
    verify_credential(&teloxide_bot).await?;

    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let store: Arc<dyn MessageStore> = store;
    let relay = UpdateDispatcher::new(store, bot);

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, relay).await
}

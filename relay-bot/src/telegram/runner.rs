//! Dispatcher runner: converts teloxide updates to core updates and hands them to the
//! [`UpdateDispatcher`]. Updates of one chat run strictly in order; chats run concurrently.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::RequestError;
use teloxide::types::{CallbackQuery, ChatId, Message as TelegramMessage, Update as TelegramUpdate};
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::core::{BotError, Result, ToCoreUpdate};
use crate::dispatcher::UpdateDispatcher;

/// Key used by teloxide to serialize updates: one worker queue per chat.
pub fn chat_key(update: &TelegramUpdate) -> Option<ChatId> {
    update.chat().map(|chat| chat.id)
}

/// Message and callback-query branches; everything else falls to the default handler.
pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(TelegramUpdate::filter_message().endpoint(on_message))
        .branch(TelegramUpdate::filter_callback_query().endpoint(on_callback))
}

async fn on_message(msg: TelegramMessage, relay: Arc<UpdateDispatcher>) -> ResponseResult<()> {
    match TelegramMessageWrapper(&msg).to_core() {
        Ok(update) => relay.dispatch(&update).await,
        Err(reason) => debug!(chat_id = msg.chat.id.0, %reason, "Skipping message"),
    }
    Ok(())
}

async fn on_callback(q: CallbackQuery, relay: Arc<UpdateDispatcher>) -> ResponseResult<()> {
    match TelegramCallbackWrapper(&q).to_core() {
        Ok(update) => relay.dispatch(&update).await,
        Err(reason) => debug!(user_id = q.from.id.0, %reason, "Skipping button press"),
    }
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C), or SIGTERM on unix.
pub async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

/// Runs the teloxide dispatcher on a background task until a shutdown signal arrives, then asks it
/// to stop and waits for in-flight updates to finish.
#[instrument(skip(bot, relay))]
pub async fn run_dispatcher(bot: teloxide::Bot, relay: UpdateDispatcher) -> Result<()> {
    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![Arc::new(relay)])
        .distribution_function(chat_key)
        .default_handler(|upd| async move {
            debug!(update_id = upd.id.0, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .build();

    let shutdown = dispatcher.shutdown_token();
    let mut worker = tokio::spawn(async move { dispatcher.dispatch().await });
    info!("Dispatcher started");

    tokio::select! {
        _ = wait_for_shutdown_signal() => {
            info!("Shutting down dispatcher");
            match shutdown.shutdown() {
                Ok(done) => done.await,
                Err(e) => warn!(error = %e, "Dispatcher was not running"),
            }
            worker
                .await
                .map_err(|e| BotError::Transport(format!("dispatcher task failed: {}", e)))?;
        }
        joined = &mut worker => {
            joined.map_err(|e| BotError::Transport(format!("dispatcher task failed: {}", e)))?;
            warn!("Dispatcher stopped on its own");
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}

//! Routes one core [`Update`] to the right handler: text messages through the [`HandlerChain`],
//! button presses to the [`CallbackHandler`].

use std::sync::Arc;

use storage::MessageStore;
use tracing::{debug, error};

use crate::chain::HandlerChain;
use crate::core::{Bot, Update};
use crate::handlers::{CallbackHandler, LoggingHandler, RelayHandler, UserSyncHandler};

#[derive(Clone)]
pub struct UpdateDispatcher {
    chain: HandlerChain,
    callbacks: Arc<CallbackHandler>,
}

impl UpdateDispatcher {
    /// Builds the default chain: logging, user sync, then the relay handler.
    pub fn new(store: Arc<dyn MessageStore>, bot: Arc<dyn Bot>) -> Self {
        let chain = HandlerChain::new()
            .add_handler(Arc::new(LoggingHandler))
            .add_handler(Arc::new(UserSyncHandler::new(store.clone())))
            .add_handler(Arc::new(RelayHandler::new(store.clone(), bot.clone())));
        Self::with_chain(chain, Arc::new(CallbackHandler::new(store, bot)))
    }

    pub fn with_chain(chain: HandlerChain, callbacks: Arc<CallbackHandler>) -> Self {
        Self { chain, callbacks }
    }

    /// Handles one update. Errors are logged and stay with that update.
    pub async fn dispatch(&self, update: &Update) {
        let chat_id = update.chat_id();
        match update {
            Update::Message(message) => match self.chain.handle(message).await {
                Ok(response) => debug!(chat_id, response = ?response, "Message handled"),
                Err(e) => error!(chat_id, error = %e, "Handler chain failed"),
            },
            Update::ButtonPress(press) => {
                if let Err(e) = self.callbacks.handle(press).await {
                    error!(chat_id, error = %e, "Button press handling failed");
                }
            }
        }
    }
}

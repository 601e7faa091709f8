//! Handler that upserts the sender into storage in before().

use std::sync::Arc;

use async_trait::async_trait;
use storage::{MessageStore, UserRecord};
use tracing::{error, instrument};

use crate::core::{Handler, Message, Result};

/// Keeps the `users` table current. A storage failure is logged and the chain still continues.
#[derive(Clone)]
pub struct UserSyncHandler {
    store: Arc<dyn MessageStore>,
}

impl UserSyncHandler {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Handler for UserSyncHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let user = &message.user;
        let record = UserRecord::new(
            user.id,
            user.first_name.clone().unwrap_or_default(),
            user.last_name.clone(),
            user.username.clone(),
        );

        if let Err(e) = self.store.upsert_user(&record).await {
            error!(error = %e, user_id = user.id, "Failed to save user");
        }
        Ok(true)
    }
}

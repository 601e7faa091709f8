//! Inbound text message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A text message received from the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transport message id.
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Full text, including any leading command marker.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

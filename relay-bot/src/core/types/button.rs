//! Inline buttons and the presses they produce.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A button to attach under an outgoing message. `action` comes back as [`ButtonPress::action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub label: String,
    pub action: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// A press on a previously sent inline button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonPress {
    /// Transport id used to acknowledge the press.
    pub id: String,
    pub user: User,
    /// Chat that owns the originating message.
    pub chat: Chat,
    /// Id of the message carrying the button.
    pub message_id: String,
    /// Opaque action token; empty when the transport sent none.
    pub action: String,
}

//! One inbound event from the transport.

use super::{button::ButtonPress, message::Message};

#[derive(Debug, Clone)]
pub enum Update {
    Message(Message),
    ButtonPress(ButtonPress),
}

impl Update {
    /// Chat the update belongs to.
    pub fn chat_id(&self) -> i64 {
        match self {
            Update::Message(m) => m.chat.id,
            Update::ButtonPress(p) => p.chat.id,
        }
    }
}

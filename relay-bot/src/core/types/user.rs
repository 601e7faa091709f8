//! Sender identity as the transport reports it.

use serde::{Deserialize, Serialize};

/// Every name field is optional; anonymous senders (channel posts) have id 0 and no names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name to address the user by: first name, else handle, else a neutral word.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.username.as_deref())
            .unwrap_or("there")
    }
}

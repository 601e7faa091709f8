//! User record model; upserted on every inbound message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    /// Platform user id.
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new record stamped with the current time.
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: Option<String>,
        username: Option<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name,
            username,
            created_at: Utc::now(),
        }
    }
}

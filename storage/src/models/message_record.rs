//! Message record model for persistence.
//!
//! Maps to the `messages` table. Records are immutable once stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    /// Auto-incrementing id, monotonic in insertion order.
    pub id: i64,
    pub chat_id: i64,
    pub user_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

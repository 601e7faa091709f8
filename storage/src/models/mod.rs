//! Persistence models mapped to the `messages` and `users` tables.

mod message_record;
mod user_record;

pub use message_record::MessageRecord;
pub use user_record::UserRecord;

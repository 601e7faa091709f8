//! Handler implementations: logging, user sync, command relay (text messages) and button presses.

mod callback;
mod logging;
mod relay;
mod user_sync;

pub use callback::CallbackHandler;
pub use logging::LoggingHandler;
pub use relay::RelayHandler;
pub use user_sync::UserSyncHandler;

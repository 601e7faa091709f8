//! Core types: user, chat, inbound message, button press, update, handler response, and Handler trait.
//!
//! One file per main type.

mod button;
mod chat;
mod handler;
mod message;
mod response;
mod update;
mod user;

pub use button::{ButtonPress, InlineButton};
pub use chat::Chat;
pub use handler::{Handler, ToCoreUpdate, ToCoreUser};
pub use message::Message;
pub use response::HandlerResponse;
pub use update::Update;
pub use user::User;

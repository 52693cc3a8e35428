//! Outbound chat messages: rendering menu and cart text, and delivering it
//! through the chat web client.

mod dispatch;
mod format;

pub use dispatch::{DispatchTimings, Dispatcher, deep_link};
pub use format::MessageTemplate;

//! Bot Transport
//!
//! Telegram-facing layer: command routing and message formatting.

pub mod handlers;
pub mod messages;

pub use handlers::{run, BotContext, Command};

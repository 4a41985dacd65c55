//! Gigmatch Bot
//!
//! Library surface of the Gigmatch Telegram bot. The interview and matching
//! services live under `services`, persistence under `storage`, and the
//! Telegram transport under `bot`.

pub mod bot;
pub mod config;
pub mod services;
pub mod storage;

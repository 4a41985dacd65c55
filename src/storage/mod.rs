//! Storage Layer
//!
//! SQLite persistence for profiles and tasks.

pub mod database;
pub mod repository;

pub use database::{Database, DbPool};
pub use repository::Repository;

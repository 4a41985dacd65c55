//! Configuration
//!
//! Environment-based configuration for the bot binary. Required variables
//! fail fast at startup with a Config error.

use gigmatch_core::{AppError, AppResult};

/// Default extraction model when GIGMATCH_MODEL is unset
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default SQLite database path when GIGMATCH_DB is unset
const DEFAULT_DB_PATH: &str = "gigmatch.db";

/// Runtime configuration for the bot process
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token
    pub telegram_token: String,
    /// OpenAI API key for the extractor
    pub openai_api_key: String,
    /// Extraction model name
    pub model: String,
    /// SQLite database file path
    pub database_path: String,
    /// Insert demo tasks into an empty database at startup
    pub seed_demo_tasks: bool,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let telegram_token = required(&lookup, "TELEGRAM_TOKEN")?;
        let openai_api_key = required(&lookup, "OPENAI_API_KEY")?;

        let model = lookup("GIGMATCH_MODEL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let database_path = lookup("GIGMATCH_DB")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let seed_demo_tasks = matches!(
            lookup("GIGMATCH_SEED_DEMO").as_deref(),
            Some("1") | Some("true") | Some("yes")
        );

        Ok(Self {
            telegram_token,
            openai_api_key,
            model,
            database_path,
            seed_demo_tasks,
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::config(format!("Missing required environment variable: {}", name)))
}

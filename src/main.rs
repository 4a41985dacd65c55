//! Gigmatch Bot - Entry Point

use std::sync::Arc;

use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gigmatch_bot::bot::{self, BotContext};
use gigmatch_bot::config::Config;
use gigmatch_bot::services::extractor::Extractor;
use gigmatch_bot::services::interview::Interviewer;
use gigmatch_bot::storage::{Database, Repository};
use gigmatch_llm::{OpenAiProvider, ProviderConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let database = Database::open(&config.database_path)?;
    database.init_schema()?;
    let repository = Repository::new(database.pool().clone());

    if config.seed_demo_tasks {
        let inserted = repository.seed_demo_tasks()?;
        if inserted > 0 {
            info!(inserted, "demo tasks seeded");
        }
    }

    let provider = Arc::new(OpenAiProvider::new(ProviderConfig {
        api_key: Some(config.openai_api_key.clone()),
        model: config.model.clone(),
        ..Default::default()
    }));
    let interviewer = Interviewer::new(Extractor::new(provider));

    let bot = Bot::new(config.telegram_token.clone());
    info!(model = %config.model, db = %config.database_path, "bot started");

    bot::run(bot, Arc::new(BotContext { interviewer, repository })).await;

    Ok(())
}

//! Bot Handlers
//!
//! Telegram transport over teloxide long-polling. Commands map 1:1 onto
//! interviewer and matcher operations; plain text is routed into the active
//! interview when one exists.

use std::sync::Arc;

use gigmatch_core::{AppError, InterviewKind};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::utils::command::BotCommands;
use tracing::warn;

use crate::services::interview::{AnswerOutcome, Interviewer};
use crate::services::matching;
use crate::storage::Repository;

use super::messages;

/// How many recommendations a /tasks call shows
const TOP_RECOMMENDATIONS: usize = 5;

/// Shared state handed to every handler invocation
pub struct BotContext {
    pub interviewer: Interviewer,
    pub repository: Repository,
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Gigmatch commands")]
pub enum Command {
    #[command(description = "main menu")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "show your profile")]
    Profile,
    #[command(description = "build your profile")]
    Interview,
    #[command(rename = "create_task", description = "post a task")]
    CreateTask,
    #[command(description = "find matching tasks")]
    Tasks,
    #[command(description = "cancel the current interview")]
    Cancel,
}

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Run the dispatcher until shutdown
pub async fn run(bot: Bot, ctx: Arc<BotContext>) {
    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    match cmd {
        Command::Start => {
            let text = match ctx.repository.get_profile_by_chat(chat_id) {
                Ok(Some(profile)) => messages::welcome_back(&profile.name),
                Ok(None) => messages::welcome_new(),
                Err(e) => {
                    warn!(chat_id, error = %e, "profile lookup failed");
                    messages::generic_error()
                }
            };
            send(&bot, chat_id, &text).await
        }
        Command::Help => send(&bot, chat_id, &messages::help_text()).await,
        Command::Profile => {
            let text = match ctx.repository.get_profile_by_chat(chat_id) {
                Ok(Some(profile)) => messages::profile_view(&profile),
                Ok(None) => messages::no_profile(),
                Err(e) => {
                    warn!(chat_id, error = %e, "profile lookup failed");
                    messages::generic_error()
                }
            };
            send(&bot, chat_id, &text).await
        }
        Command::Interview => start_interview(&bot, &ctx, chat_id, InterviewKind::Profile).await,
        Command::CreateTask => start_interview(&bot, &ctx, chat_id, InterviewKind::Task).await,
        Command::Tasks => handle_tasks(&bot, &ctx, chat_id).await,
        Command::Cancel => handle_cancel(&bot, &ctx, chat_id).await,
    }
}

async fn handle_text(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if !ctx.interviewer.is_in_interview(chat_id).await {
        return send(&bot, chat_id, &messages::unknown_input()).await;
    }

    let kind = ctx.interviewer.interview_kind(chat_id).await;
    match ctx.interviewer.process_answer(chat_id, text).await {
        Ok(AnswerOutcome::Reprompt) => send(&bot, chat_id, &messages::reprompt()).await,
        Ok(AnswerOutcome::Next(question)) => {
            send(&bot, chat_id, &messages::format_question(&question)).await
        }
        Ok(AnswerOutcome::Finished) => match kind {
            Some(kind) => finalize(&bot, &ctx, chat_id, kind).await,
            None => send(&bot, chat_id, &messages::generic_error()).await,
        },
        Err(e) => {
            warn!(chat_id, error = %e, "answer processing failed");
            send(&bot, chat_id, &messages::generic_error()).await
        }
    }
}

async fn start_interview(
    bot: &Bot,
    ctx: &BotContext,
    chat_id: i64,
    kind: InterviewKind,
) -> HandlerResult {
    match ctx.interviewer.start_interview(chat_id, kind).await {
        Ok(()) => {
            let question = ctx.interviewer.current_question(chat_id).await?;
            send(bot, chat_id, &messages::format_question(&question)).await
        }
        Err(AppError::AlreadyActive(active)) => {
            send(bot, chat_id, &messages::already_active(active)).await
        }
        Err(e) => {
            warn!(chat_id, error = %e, "failed to start interview");
            send(bot, chat_id, &messages::generic_error()).await
        }
    }
}

async fn handle_cancel(bot: &Bot, ctx: &BotContext, chat_id: i64) -> HandlerResult {
    match ctx.interviewer.interview_kind(chat_id).await {
        Some(kind) => {
            ctx.interviewer.cancel_interview(chat_id).await;
            send(bot, chat_id, &messages::cancelled(kind)).await
        }
        None => send(bot, chat_id, &messages::not_in_interview()).await,
    }
}

async fn handle_tasks(bot: &Bot, ctx: &BotContext, chat_id: i64) -> HandlerResult {
    let profile = match ctx.repository.get_profile_by_chat(chat_id) {
        Ok(Some(profile)) => profile,
        Ok(None) => return send(bot, chat_id, &messages::no_profile()).await,
        Err(e) => {
            warn!(chat_id, error = %e, "profile lookup failed");
            return send(bot, chat_id, &messages::generic_error()).await;
        }
    };

    let tasks = match ctx.repository.list_open_tasks() {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(chat_id, error = %e, "task listing failed");
            return send(bot, chat_id, &messages::generic_error()).await;
        }
    };
    if tasks.is_empty() {
        return send(bot, chat_id, &messages::no_open_tasks()).await;
    }

    let ranked = matching::recommend_top_tasks(&profile, &tasks, TOP_RECOMMENDATIONS);
    if ranked.is_empty() {
        return send(bot, chat_id, &messages::no_matches()).await;
    }

    let entries: Vec<_> = ranked
        .iter()
        .filter_map(|result| {
            tasks
                .iter()
                .find(|task| task.id == result.task_id)
                .map(|task| (task, result))
        })
        .collect();

    send(bot, chat_id, &messages::recommendations(&entries)).await
}

/// Turn a finished session into a persisted record.
/// Extraction failures keep the session so any next message retries.
async fn finalize(bot: &Bot, ctx: &BotContext, chat_id: i64, kind: InterviewKind) -> HandlerResult {
    let outcome = match kind {
        InterviewKind::Profile => match ctx.interviewer.extract_profile(chat_id).await {
            Ok(profile) => ctx
                .repository
                .save_profile(&profile)
                .map(|_| messages::profile_saved()),
            Err(e) => Err(e),
        },
        InterviewKind::Task => match ctx.interviewer.extract_task(chat_id).await {
            Ok(task) => ctx
                .repository
                .save_task(&task)
                .map(|_| messages::task_saved(&task)),
            Err(e) => Err(e),
        },
    };

    match outcome {
        Ok(text) => send(bot, chat_id, &text).await,
        Err(AppError::Extraction(reason)) => {
            warn!(chat_id, %reason, "finalization extraction failed, session kept");
            send(bot, chat_id, &messages::extraction_failed()).await
        }
        Err(e) => {
            warn!(chat_id, error = %e, "finalization failed");
            send(bot, chat_id, &messages::generic_error()).await
        }
    }
}

async fn send(bot: &Bot, chat_id: i64, text: &str) -> HandlerResult {
    for chunk in messages::split_message(text, messages::MAX_MESSAGE_LENGTH) {
        bot.send_message(ChatId(chat_id), chunk).await?;
    }
    Ok(())
}

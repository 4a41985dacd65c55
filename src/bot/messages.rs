//! Bot Messages
//!
//! User-facing message formatting for the Telegram transport, plus message
//! splitting for Telegram's length limit.

use gigmatch_core::{InterviewKind, MatchResult, Profile, Task};

use crate::services::interview::RenderedQuestion;

/// Telegram allows 4096; keep headroom for safety
pub const MAX_MESSAGE_LENGTH: usize = 4000;

pub fn welcome_new() -> String {
    "👋 Welcome to Gigmatch!\n\n\
     🤖 I will help you build your digital profile and find matching tasks.\n\n\
     Start with the interview: /interview"
        .to_string()
}

pub fn welcome_back(name: &str) -> String {
    format!(
        "👋 Welcome back, {}!\n\n\
         ✅ Your profile is ready. You can:\n\
         • View your profile: /profile\n\
         • Find tasks: /tasks\n\
         • Post a task: /create_task",
        name
    )
}

pub fn help_text() -> String {
    "🤖 Gigmatch finds tasks for contractors and contractors for tasks.\n\n\
     Commands:\n\
     /start - main menu\n\
     /profile - your profile\n\
     /interview - build your profile\n\
     /tasks - find matching tasks\n\
     /create_task - post a task\n\
     /cancel - cancel the current interview\n\
     /help - this help\n\n\
     How it works:\n\
     1. Take the interview to build your profile\n\
     2. Get personal task recommendations\n\
     3. Or post your own tasks for others"
        .to_string()
}

/// Render a question with its kind banner and progress counter
pub fn format_question(question: &RenderedQuestion) -> String {
    let banner = match question.kind {
        InterviewKind::Profile => "👤 Creating your profile",
        InterviewKind::Task => "📋 Creating a task",
    };
    format!(
        "{} (question {}/{})\n\n{}\n\n💡 Use /cancel to abort the interview",
        banner,
        question.step + 1,
        question.total,
        question.text
    )
}

pub fn reprompt() -> String {
    "⚠️ Please answer the question.".to_string()
}

pub fn already_active(kind: InterviewKind) -> String {
    let what = match kind {
        InterviewKind::Profile => "profile creation",
        InterviewKind::Task => "task creation",
    };
    format!(
        "⚠️ You are already in a {} interview.\n\nUse /cancel to abort it first.",
        what
    )
}

pub fn cancelled(kind: InterviewKind) -> String {
    let what = match kind {
        InterviewKind::Profile => "profile creation",
        InterviewKind::Task => "task creation",
    };
    format!("❌ The {} interview was cancelled.\n\nUse /start to get back to the menu.", what)
}

pub fn not_in_interview() -> String {
    "❌ You are not in an interview right now.".to_string()
}

pub fn no_profile() -> String {
    "❌ You don't have a profile yet.\n\n🚀 Take the interview: /interview".to_string()
}

pub fn profile_view(profile: &Profile) -> String {
    format!(
        "👤 Your profile:\n\n\
         🏷️ Name: {}\n\
         🛠️ Skills: {}\n\
         💡 Interests: {}\n\
         🎯 Goals: {}\n\n\
         📅 Created: {}\n\
         🔄 Updated: {}",
        profile.name,
        format_skills(profile),
        join_or_dash(&profile.interests),
        join_or_dash(&profile.goals),
        profile.created_at.format("%d.%m.%Y"),
        profile.updated_at.format("%d.%m.%Y"),
    )
}

pub fn profile_saved() -> String {
    "✅ Interview finished! Your profile has been created.\n\n\
     🎯 You can look for tasks now: /tasks"
        .to_string()
}

pub fn task_saved(task: &Task) -> String {
    format!(
        "✅ Task created!\n\n\
         📋 {}\n\
         💰 Budget: {}\n\
         ⏰ Deadline: {}\n\n\
         🎯 Your task is in the system and will be shown to matching contractors.",
        task.title,
        task.budget,
        task.deadline.format("%d.%m.%Y"),
    )
}

pub fn no_open_tasks() -> String {
    "😔 No open tasks at the moment. Check back later!\n\n\
     ➕ Or post your own: /create_task"
        .to_string()
}

pub fn no_matches() -> String {
    "😕 No matching tasks found. Try updating your profile: /interview".to_string()
}

/// Render the recommendation list; each entry carries the task and its match
pub fn recommendations(entries: &[(&Task, &MatchResult)]) -> String {
    let mut text = String::from("🎯 Recommended tasks:\n");
    for (task, result) in entries {
        text.push_str(&format!(
            "\n📋 {}\n💰 {}\n🎯 Match: {:.0}%\n⏰ Due {}\n",
            task.title,
            task.budget,
            result.score * 100.0,
            task.deadline.format("%d.%m"),
        ));
        for reason in result.reasons.iter().take(3) {
            text.push_str(&format!("   {}\n", reason));
        }
    }
    text
}

pub fn unknown_input() -> String {
    "❓ I don't understand that. Use /help for the command list.".to_string()
}

pub fn extraction_failed() -> String {
    "❌ I couldn't process your answers just now.\n\n\
     Your interview is still saved - send any message to retry."
        .to_string()
}

pub fn generic_error() -> String {
    "⚠️ Something went wrong. Please try again later.".to_string()
}

fn format_skills(profile: &Profile) -> String {
    if profile.skills.is_empty() {
        return "-".to_string();
    }
    let mut skills: Vec<_> = profile.skills.values().collect();
    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills
        .iter()
        .map(|skill| {
            let badge = if skill.verified { " ✅" } else { "" };
            format!("{} ({}/5){}", skill.name, skill.level, badge)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Split long messages at line boundaries to respect platform limits
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if current.len() + line.len() + 1 > max_len {
            if !current.is_empty() {
                chunks.push(current.clone());
                current.clear();
            }
            // Handle single lines longer than max_len
            if line.len() > max_len {
                let mut start = 0;
                while start < line.len() {
                    let end = std::cmp::min(start + max_len, line.len());
                    chunks.push(line[start..end].to_string());
                    start = end;
                }
                continue;
            }
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

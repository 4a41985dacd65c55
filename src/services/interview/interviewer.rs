//! Interviewer
//!
//! Drives the per-user interview state machine: start, answer processing,
//! finalization into a structured record, and cancellation. Per-answer hint
//! analysis is best effort; finalization failures keep the session so the
//! caller can retry without losing the transcript.

use chrono::Duration;
use gigmatch_core::{
    AppError, AppResult, InterviewKind, InterviewSession, Profile, SkillLevel, Task, TaskStatus,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::services::extractor::Extractor;

use super::questions::QuestionBank;
use super::session::SessionStore;

/// Deadline applied when the extractor reports none
const DEFAULT_DEADLINE_DAYS: i64 = 14;

/// A question rendered for delivery, with its position in the sequence
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuestion {
    pub kind: InterviewKind,
    /// 0-based step of this question
    pub step: usize,
    /// Total questions for this kind
    pub total: usize,
    pub text: String,
}

/// Result of processing one answer
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Empty or whitespace-only answer; state unchanged, ask again
    Reprompt,
    /// Answer accepted; here is the next question
    Next(RenderedQuestion),
    /// All questions answered; the session awaits finalization
    Finished,
}

/// The interview state machine
pub struct Interviewer {
    extractor: Extractor,
    sessions: SessionStore,
    questions: QuestionBank,
}

impl Interviewer {
    pub fn new(extractor: Extractor) -> Self {
        Self {
            extractor,
            sessions: SessionStore::new(),
            questions: QuestionBank::new(),
        }
    }

    /// Start a new interview for the user.
    ///
    /// Rejects with `AlreadyActive` when a session of either kind exists;
    /// the user has to cancel explicitly before starting over.
    pub async fn start_interview(&self, chat_id: i64, kind: InterviewKind) -> AppResult<()> {
        self.sessions
            .try_create(InterviewSession::new(chat_id, kind))
            .await
            .map_err(AppError::AlreadyActive)?;

        info!(chat_id, kind = %kind, "interview started");
        Ok(())
    }

    /// Start an interview from a transport-supplied kind string.
    /// Unknown kinds are rejected with `InvalidKind`.
    pub async fn start_interview_by_name(&self, chat_id: i64, kind: &str) -> AppResult<()> {
        let kind = InterviewKind::parse(kind)
            .ok_or_else(|| AppError::InvalidKind(kind.to_string()))?;
        self.start_interview(chat_id, kind).await
    }

    /// The question for the user's current step. Side-effect-free.
    pub async fn current_question(&self, chat_id: i64) -> AppResult<RenderedQuestion> {
        let shard = self.sessions.read(chat_id).await;
        let session = shard.get(&chat_id).ok_or(AppError::NoSession)?;
        self.render(session)
    }

    /// Process one answer for the user's active session.
    ///
    /// The owning shard's write lock is held for the whole call, including
    /// the awaited hint analysis, so per-user mutations stay linearizable.
    pub async fn process_answer(&self, chat_id: i64, text: &str) -> AppResult<AnswerOutcome> {
        let mut shard = self.sessions.write(chat_id).await;
        let session = shard.get_mut(&chat_id).ok_or(AppError::NoSession)?;

        let total = self.questions.max_steps(session.kind);
        if session.current_step >= total {
            // All questions already answered; signal finalization again
            return Ok(AnswerOutcome::Finished);
        }

        if text.trim().is_empty() {
            return Ok(AnswerOutcome::Reprompt);
        }

        session.record_answer(text);

        // Best-effort enrichment; a failed analysis never fails the step
        let kind = session.kind;
        match self.extractor.analyze_answer(kind, text).await {
            Ok(hints) => session.context.merge(hints),
            Err(e) => {
                debug!(chat_id, error = %e, "answer analysis failed, keeping existing context")
            }
        }

        session.current_step += 1;

        if session.current_step >= total {
            info!(chat_id, kind = %kind, "interview finished, awaiting finalization");
            return Ok(AnswerOutcome::Finished);
        }

        let next = self.render(session)?;
        Ok(AnswerOutcome::Next(next))
    }

    /// Finalize a profile interview into a Profile record.
    ///
    /// Deletes the session on success; on extraction failure the session is
    /// left untouched so the caller may retry.
    pub async fn extract_profile(&self, chat_id: i64) -> AppResult<Profile> {
        let mut shard = self.sessions.write(chat_id).await;
        let session = shard.get(&chat_id).ok_or(AppError::NoSession)?;
        if session.kind != InterviewKind::Profile {
            return Err(AppError::WrongKind {
                expected: InterviewKind::Profile,
                actual: session.kind,
            });
        }

        let transcript = self.transcript(session);
        let extraction = self.extractor.extract_profile(&transcript).await?;

        let mut profile = Profile::new(Uuid::new_v4().to_string(), chat_id);
        if let Some(name) = extraction.name {
            profile.name = name;
        }
        for (name, rating) in extraction.skills {
            profile
                .skills
                .insert(name.clone(), SkillLevel::from_interview(name, rating.level));
        }
        profile.interests = extraction.interests;
        profile.goals = extraction.goals;
        profile.soft_skills = extraction.soft_skills;

        shard.remove(&chat_id);
        info!(chat_id, profile_id = %profile.id, "profile extracted");
        Ok(profile)
    }

    /// Finalize a task interview into a Task record.
    ///
    /// Deletes the session on success; on extraction failure the session is
    /// left untouched so the caller may retry.
    pub async fn extract_task(&self, chat_id: i64) -> AppResult<Task> {
        let mut shard = self.sessions.write(chat_id).await;
        let session = shard.get(&chat_id).ok_or(AppError::NoSession)?;
        if session.kind != InterviewKind::Task {
            return Err(AppError::WrongKind {
                expected: InterviewKind::Task,
                actual: session.kind,
            });
        }

        let started_at = session.started_at;
        let transcript = self.transcript(session);
        let extraction = self.extractor.extract_task(&transcript).await?;

        let deadline_days = extraction.deadline_days.unwrap_or(DEFAULT_DEADLINE_DAYS);
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: extraction.title.unwrap_or_default(),
            description: extraction.description.unwrap_or_default(),
            required_skills: extraction.required_skills,
            budget: extraction.budget.unwrap_or(0),
            deadline: started_at + Duration::days(deadline_days),
            owner_id: chat_id.to_string(),
            status: TaskStatus::Open,
            created_at: started_at,
        };

        shard.remove(&chat_id);
        info!(chat_id, task_id = %task.id, "task extracted");
        Ok(task)
    }

    /// Delete the user's session if present. Idempotent, never fails.
    pub async fn cancel_interview(&self, chat_id: i64) {
        if self.sessions.remove(chat_id).await.is_some() {
            info!(chat_id, "interview cancelled");
        }
    }

    pub async fn is_in_interview(&self, chat_id: i64) -> bool {
        self.sessions.exists(chat_id).await
    }

    pub async fn interview_kind(&self, chat_id: i64) -> Option<InterviewKind> {
        self.sessions.kind_of(chat_id).await
    }

    /// Render the question at the session's current step
    fn render(&self, session: &InterviewSession) -> AppResult<RenderedQuestion> {
        let total = self.questions.max_steps(session.kind);
        let text = self
            .questions
            .question(session.kind, session.current_step, &session.context)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "no question at step {} for {} interview",
                    session.current_step, session.kind
                ))
            })?;

        Ok(RenderedQuestion {
            kind: session.kind,
            step: session.current_step,
            total,
            text,
        })
    }

    /// Concatenate recorded (question, answer) pairs in step order
    fn transcript(&self, session: &InterviewSession) -> String {
        let mut transcript = String::new();
        for (step, answer) in &session.answers {
            let question = self
                .questions
                .question(session.kind, *step, &session.context)
                .unwrap_or_default();
            transcript.push_str(&format!("Q: {}\nA: {}\n\n", question, answer));
        }
        transcript
    }
}

//! Extractor Service
//!
//! Converts free-form interview text into structured fields through an LLM
//! provider. Two call shapes exist: per-answer hint analysis (best effort,
//! callers swallow failures) and full-transcript record extraction (failures
//! propagate so the caller can retry with the transcript intact).

pub mod prompts;
pub mod schema;

use std::sync::Arc;

use gigmatch_core::{AppError, AppResult, InterviewKind, SessionContext};
use gigmatch_llm::{LlmProvider, Message};
use tracing::debug;

pub use schema::{ProfileExtraction, SkillRating, TaskExtraction};

/// LLM-backed extraction collaborator
pub struct Extractor {
    provider: Arc<dyn LlmProvider>,
}

impl Extractor {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Analyze one answer for context hints of the session's kind
    pub async fn analyze_answer(
        &self,
        kind: InterviewKind,
        answer: &str,
    ) -> AppResult<SessionContext> {
        match kind {
            InterviewKind::Profile => {
                let value = self
                    .complete(prompts::ANALYST_SYSTEM, prompts::analyze_profile_answer(answer))
                    .await?;
                let hints = schema::parse_profile_hints(&value)
                    .ok_or_else(|| AppError::extraction("analysis response is not a JSON object"))?;
                Ok(SessionContext::Profile(hints))
            }
            InterviewKind::Task => {
                let value = self
                    .complete(prompts::ANALYST_SYSTEM, prompts::analyze_task_answer(answer))
                    .await?;
                let hints = schema::parse_task_hints(&value)
                    .ok_or_else(|| AppError::extraction("analysis response is not a JSON object"))?;
                Ok(SessionContext::Task(hints))
            }
        }
    }

    /// Extract a structured profile record from a full transcript
    pub async fn extract_profile(&self, transcript: &str) -> AppResult<ProfileExtraction> {
        let value = self
            .complete(prompts::EXTRACTION_SYSTEM, prompts::extract_profile(transcript))
            .await?;
        ProfileExtraction::from_value(&value)
            .ok_or_else(|| AppError::extraction("profile response is not a JSON object"))
    }

    /// Extract a structured task record from a full transcript
    pub async fn extract_task(&self, transcript: &str) -> AppResult<TaskExtraction> {
        let value = self
            .complete(prompts::EXTRACTION_SYSTEM, prompts::extract_task(transcript))
            .await?;
        TaskExtraction::from_value(&value)
            .ok_or_else(|| AppError::extraction("task response is not a JSON object"))
    }

    /// Run one completion and parse the harvested JSON payload
    async fn complete(&self, system: &str, prompt: String) -> AppResult<serde_json::Value> {
        let response = self
            .provider
            .send_message(vec![Message::user(prompt)], Some(system.to_string()))
            .await
            .map_err(|e| AppError::extraction(e.to_string()))?;

        let text = response
            .text()
            .ok_or_else(|| AppError::extraction("provider returned an empty response"))?;

        let json_str = extract_json_from_response(text);
        serde_json::from_str(&json_str).map_err(|e| {
            debug!(error = %e, "extractor response was not parseable JSON");
            AppError::extraction(format!("unparseable response: {}", e))
        })
    }
}

/// Extract JSON from an LLM response string, handling markdown fences and
/// surrounding prose.
fn extract_json_from_response(text: &str) -> String {
    let trimmed = text.trim();

    // Try markdown code fences
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim().to_string();
        }
    }

    // Try JSON object { ... }
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start <= end {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

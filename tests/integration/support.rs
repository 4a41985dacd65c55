//! Test Support
//!
//! A scripted LlmProvider implementation: responses are consumed in call
//! order; once the script is exhausted an empty JSON object is returned so
//! best-effort hint calls stay harmless.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gigmatch_bot::services::extractor::Extractor;
use gigmatch_bot::services::interview::Interviewer;
use gigmatch_llm::types::UsageStats;
use gigmatch_llm::{LlmError, LlmProvider, LlmResponse, LlmResult, Message, ProviderConfig};

pub struct MockProvider {
    config: ProviderConfig,
    script: Mutex<VecDeque<Result<String, LlmError>>>,
}

impl MockProvider {
    /// Responses returned in order; after the script runs out, every call
    /// yields `{}`.
    pub fn scripted(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            config: ProviderConfig {
                model: "mock-model".to_string(),
                ..Default::default()
            },
            script: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// A provider whose every call fails
    pub fn failing() -> Self {
        Self::scripted(vec![Err(mock_error()); 64])
    }
}

pub fn mock_error() -> LlmError {
    LlmError::NetworkError {
        message: "mock provider offline".to_string(),
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        _messages: Vec<Message>,
        _system: Option<String>,
    ) -> LlmResult<LlmResponse> {
        let next = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok("{}".to_string()));

        next.map(|content| LlmResponse {
            content: Some(content),
            usage: UsageStats::default(),
            model: self.config.model.clone(),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// An interviewer wired to the given script
pub fn interviewer_with_script(responses: Vec<Result<String, LlmError>>) -> Interviewer {
    Interviewer::new(Extractor::new(Arc::new(MockProvider::scripted(responses))))
}

/// An interviewer whose extractor always fails
pub fn interviewer_with_failing_extractor() -> Interviewer {
    Interviewer::new(Extractor::new(Arc::new(MockProvider::failing())))
}

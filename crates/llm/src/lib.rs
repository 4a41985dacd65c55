//! Gigmatch LLM
//!
//! Provider abstraction for the text-understanding collaborator. Exposes a
//! single blocking request/response interface; retry and timeout policy is
//! left to callers.

pub mod openai;
pub mod provider;
pub mod types;

pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use types::{LlmError, LlmResponse, LlmResult, Message, MessageRole, ProviderConfig};

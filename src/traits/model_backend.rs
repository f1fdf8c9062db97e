use async_trait::async_trait;
use serde_json::Value;

use crate::errors::GenerationResult;

/// A fully rendered request for the generation service
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Domain framing sent as the system turn
    pub system_instruction: String,
    /// The user turn carrying the feature prompt
    pub user_prompt: String,
    /// JSON schema the response must follow
    pub response_schema: Value,
    /// Reasoning token budget, if the backend supports one
    pub thinking_budget: Option<u32>,
}

/// Transport to a hosted model. One call is one attempt: implementations
/// must not retry or cache.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send the request and return the raw response text, which may be empty
    /// or wrapped in a markdown fence.
    async fn complete(&self, request: &GenerationRequest) -> GenerationResult<String>;

    /// Short name used in log lines
    fn name(&self) -> &str;
}

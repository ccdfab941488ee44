//! Wire types for LLM provider configuration.

use serde::{Deserialize, Serialize};

/// LLM provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Perplexity,
    OpenAI,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Perplexity => write!(f, "perplexity"),
            LlmProvider::OpenAI => write!(f, "openai"),
        }
    }
}

/// Provider config response (keys masked).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfigResponse {
    pub preferred_provider: String,
    pub perplexity_configured: bool,
    pub openai_configured: bool,
    pub perplexity_model: String,
    pub openai_model: String,
    pub active_provider: Option<String>,
}

/// Provider config update request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfigUpdate {
    pub preferred_provider: Option<String>,
    pub perplexity_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub perplexity_model: Option<String>,
    pub openai_model: Option<String>,
}

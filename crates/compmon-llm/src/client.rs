//! Chat-completion client.
//!
//! Analysis calls never fail the caller: any transport, status, or parse
//! problem degrades to a default (empty) analysis, because the model's output
//! format cannot be fully controlled and a bad reply must not sink the
//! request that triggered it.

use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, warn};

use compmon_analysis::{CompetitorAnalysis, ImageAnalysis};
use compmon_core::{Error, Result};

use crate::config::ResolvedProvider;
use crate::parse::extract_json;

/// Longest competitor text forwarded to the model.
const MAX_INPUT_CHARS: usize = 3000;

/// Inputs shorter than this are not worth a round trip.
const MIN_INPUT_CHARS: usize = 10;

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert competitor analyst. Your job is to \
deeply analyze competitor information and provide structured, practical insights.\n\n\
Analyze these aspects:\n\
1. STRENGTHS - What does the competitor do well?\n\
2. WEAKNESSES - Where are the gaps?\n\
3. UNIQUE OFFERS - What sets it apart in the market?\n\
4. OPPORTUNITIES - How can it be attacked or outcompeted?\n\
5. RECOMMENDATIONS - Concrete counter-moves\n\n\
Respond ONLY in JSON format, with no extra text.";

const VISION_PROMPT: &str = "Analyze this competitor marketing asset. Return ONLY a JSON \
object with these keys: \"description\" (what the image shows), \"marketing_insights\" \
(list of strings), \"visual_style_score\" (integer 0-10), \"visual_style_analysis\" \
(string), \"cta_analysis\" (string), \"recommendations\" (list of strings).";

pub struct LlmClient {
    http: Client,
}

impl Default for LlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// POST a chat-completion payload and return the first choice's content.
    async fn post_chat(
        &self,
        resolved: &ResolvedProvider,
        payload: serde_json::Value,
    ) -> Result<String> {
        debug!(
            provider = %resolved.provider,
            model = %resolved.model,
            "sending chat completion"
        );

        let response = self
            .http
            .post(&resolved.url)
            .header("Authorization", format!("Bearer {}", resolved.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(Error::Llm(format!("API error {status}: {snippet}")));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Malformed API response: {e}")))?;

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Llm("No message content in API response".into()))
    }

    /// Analyze a competitor description. Never fails; degraded replies come
    /// back as a default analysis.
    pub async fn analyze_competitor(
        &self,
        resolved: &ResolvedProvider,
        text: &str,
    ) -> CompetitorAnalysis {
        if text.trim().chars().count() < MIN_INPUT_CHARS {
            warn!("competitor text too short to analyze");
            return CompetitorAnalysis::default();
        }

        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
        let user_prompt = format!(
            "Analyze the following competitor information:\n\n{truncated}\n\n\
             Return the answer in exactly this JSON format:\n\
             {{\n\
                 \"strengths\": [\"strength 1\", \"strength 2\", ...],\n\
                 \"weaknesses\": [\"weakness 1\", \"weakness 2\", ...],\n\
                 \"unique_offers\": [\"unique offer 1\", ...],\n\
                 \"opportunities\": [\"attack opportunity 1\", ...],\n\
                 \"recommendations\": [\"recommendation 1\", ...],\n\
                 \"summary\": \"Short summary of the analysis (3-5 sentences)\"\n\
             }}\n\n\
             Be specific. Every item must be actionable."
        );

        let payload = json!({
            "model": resolved.model,
            "messages": [
                {"role": "system", "content": ANALYSIS_SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt},
            ],
            "temperature": 0.7,
            "max_tokens": 2000,
            "top_p": 0.9,
        });

        match self.post_chat(resolved, payload).await {
            Ok(content) => {
                debug!(chars = content.len(), "received analysis reply");
                match extract_json(&content)
                    .and_then(|value| serde_json::from_value::<CompetitorAnalysis>(value).ok())
                {
                    Some(analysis) => analysis,
                    None => {
                        warn!("analysis reply had no usable JSON, returning empty analysis");
                        CompetitorAnalysis::default()
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "competitor analysis request failed");
                CompetitorAnalysis::default()
            }
        }
    }

    /// Ask the model for a competitor list in the markup the extractor
    /// understands. Returns the raw reply text.
    pub async fn discover_competitors(
        &self,
        resolved: &ResolvedProvider,
        query: &str,
    ) -> Result<String> {
        let truncated: String = query.chars().take(MAX_INPUT_CHARS).collect();
        let user_prompt = format!(
            "List the main competitors for the following product or market:\n\n{truncated}\n\n\
             Format every competitor as a markdown bullet on its own line:\n\
             - **Name** – one-sentence description of what it does and how strong it is.\n\
             List at most 10 competitors, strongest first. No other text."
        );

        let payload = json!({
            "model": resolved.model,
            "messages": [
                {"role": "user", "content": user_prompt},
            ],
            "temperature": 0.7,
            "max_tokens": 2000,
            "top_p": 0.9,
        });

        self.post_chat(resolved, payload).await
    }

    /// Analyze a competitor image. Never fails; degraded replies come back as
    /// a default analysis.
    pub async fn analyze_image(
        &self,
        resolved: &ResolvedProvider,
        image_base64: &str,
        image_type: &str,
    ) -> ImageAnalysis {
        let payload = json!({
            "model": resolved.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {"type": "text", "text": VISION_PROMPT},
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:{image_type};base64,{image_base64}"),
                            },
                        },
                    ],
                },
            ],
            "max_tokens": 1000,
        });

        match self.post_chat(resolved, payload).await {
            Ok(content) => match extract_json(&content)
                .and_then(|value| serde_json::from_value::<ImageAnalysis>(value).ok())
            {
                Some(analysis) => analysis,
                None => {
                    warn!("vision reply had no usable JSON, returning empty analysis");
                    ImageAnalysis::default()
                }
            },
            Err(e) => {
                error!(error = %e, "image analysis request failed");
                ImageAnalysis::default()
            }
        }
    }
}

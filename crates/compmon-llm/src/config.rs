//! Provider configuration persistence and selection.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{LlmConfigResponse, LlmConfigUpdate, LlmProvider};

pub const PERPLEXITY_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";

pub const DEFAULT_PERPLEXITY_MODEL: &str = "sonar";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// A concrete provider choice ready to call.
#[derive(Debug, Clone)]
pub struct ResolvedProvider {
    pub provider: LlmProvider,
    pub url: String,
    pub model: String,
    pub api_key: String,
}

/// Stored provider configuration (persisted to llm-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub perplexity_api_key: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_perplexity_model")]
    pub perplexity_model: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Path to config file for saving.
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_perplexity_model() -> String {
    DEFAULT_PERPLEXITY_MODEL.into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            perplexity_api_key: None,
            openai_api_key: None,
            perplexity_model: DEFAULT_PERPLEXITY_MODEL.into(),
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            config_path: PathBuf::new(),
        }
    }
}

impl LlmConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        let mut config: LlmConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        config.config_path = config_path.to_path_buf();

        // Env vars as fallback for API keys
        if config.perplexity_api_key.is_none() {
            config.perplexity_api_key = std::env::var("PERPLEXITY_API_KEY").ok();
        }
        if config.openai_api_key.is_none() {
            config.openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        config
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved LLM config to {}", self.config_path.display());
        Ok(())
    }

    /// Apply an update, merging with existing config.
    pub fn apply_update(&mut self, update: &LlmConfigUpdate) {
        if let Some(p) = &update.preferred_provider {
            self.preferred_provider = p.clone();
        }
        if let Some(k) = &update.perplexity_api_key {
            self.perplexity_api_key = Some(k.clone());
        }
        if let Some(k) = &update.openai_api_key {
            self.openai_api_key = Some(k.clone());
        }
        if let Some(m) = &update.perplexity_model {
            self.perplexity_model = m.clone();
        }
        if let Some(m) = &update.openai_model {
            self.openai_model = m.clone();
        }
    }

    /// Resolve which provider to call.
    ///
    /// Auto mode prefers Perplexity (the primary provider in this deployment)
    /// and falls back to an OpenAI-compatible key.
    pub fn resolve_provider(&self) -> Option<ResolvedProvider> {
        if self.preferred_provider != "auto" {
            return match self.preferred_provider.as_str() {
                "perplexity" => self.perplexity_api_key.as_ref().map(|k| ResolvedProvider {
                    provider: LlmProvider::Perplexity,
                    url: PERPLEXITY_URL.into(),
                    model: self.perplexity_model.clone(),
                    api_key: k.clone(),
                }),
                "openai" => self.openai_api_key.as_ref().map(|k| ResolvedProvider {
                    provider: LlmProvider::OpenAI,
                    url: OPENAI_URL.into(),
                    model: self.openai_model.clone(),
                    api_key: k.clone(),
                }),
                _ => None,
            };
        }

        if let Some(k) = &self.perplexity_api_key {
            return Some(ResolvedProvider {
                provider: LlmProvider::Perplexity,
                url: PERPLEXITY_URL.into(),
                model: self.perplexity_model.clone(),
                api_key: k.clone(),
            });
        }
        if let Some(k) = &self.openai_api_key {
            return Some(ResolvedProvider {
                provider: LlmProvider::OpenAI,
                url: OPENAI_URL.into(),
                model: self.openai_model.clone(),
                api_key: k.clone(),
            });
        }

        None
    }

    /// Build the public config response (no API keys exposed).
    pub fn to_response(&self) -> LlmConfigResponse {
        let resolved = self.resolve_provider();
        LlmConfigResponse {
            preferred_provider: self.preferred_provider.clone(),
            perplexity_configured: self.perplexity_api_key.is_some(),
            openai_configured: self.openai_api_key.is_some(),
            perplexity_model: self.perplexity_model.clone(),
            openai_model: self.openai_model.clone(),
            active_provider: resolved.map(|r| r.provider.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_prefers_perplexity() {
        let config = LlmConfig {
            perplexity_api_key: Some("pplx-key".into()),
            openai_api_key: Some("sk-key".into()),
            ..LlmConfig::default()
        };
        let resolved = config.resolve_provider().unwrap();
        assert_eq!(resolved.provider, LlmProvider::Perplexity);
        assert_eq!(resolved.model, DEFAULT_PERPLEXITY_MODEL);
    }

    #[test]
    fn test_explicit_preference_without_key_resolves_none() {
        let config = LlmConfig {
            preferred_provider: "openai".into(),
            perplexity_api_key: Some("pplx-key".into()),
            ..LlmConfig::default()
        };
        assert!(config.resolve_provider().is_none());
    }

    #[test]
    fn test_response_masks_keys() {
        let config = LlmConfig {
            perplexity_api_key: Some("pplx-key".into()),
            ..LlmConfig::default()
        };
        let response = config.to_response();
        assert!(response.perplexity_configured);
        assert!(!response.openai_configured);
        assert_eq!(response.active_provider.as_deref(), Some("perplexity"));
        // The response type has no key fields at all; nothing to leak.
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("pplx-key"));
    }

    #[test]
    fn test_apply_update_merges() {
        let mut config = LlmConfig::default();
        config.apply_update(&crate::types::LlmConfigUpdate {
            preferred_provider: Some("perplexity".into()),
            perplexity_api_key: Some("pplx-key".into()),
            openai_api_key: None,
            perplexity_model: None,
            openai_model: None,
        });
        assert_eq!(config.preferred_provider, "perplexity");
        assert_eq!(config.perplexity_api_key.as_deref(), Some("pplx-key"));
        assert_eq!(config.perplexity_model, DEFAULT_PERPLEXITY_MODEL);
    }
}

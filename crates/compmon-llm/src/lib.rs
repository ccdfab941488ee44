//! LLM provider access: configuration, chat-completion calls, and JSON
//! salvage for replies that wrap their payload in markdown.

pub mod client;
pub mod config;
pub mod parse;
pub mod types;

pub use client::LlmClient;
pub use config::{LlmConfig, ResolvedProvider};
pub use types::{LlmConfigResponse, LlmConfigUpdate, LlmProvider};

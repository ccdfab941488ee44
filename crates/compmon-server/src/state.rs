//! Shared application state.

use compmon_core::CompMonConfig;
use compmon_llm::{LlmClient, LlmConfig};
use compmon_store::AnalysisStore;
use parking_lot::RwLock;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: CompMonConfig,
    pub store: AnalysisStore,
    pub llm_config: RwLock<LlmConfig>,
    pub llm_client: LlmClient,
}

impl AppState {
    pub fn new(config: CompMonConfig, store: AnalysisStore) -> Self {
        let llm_config = LlmConfig::load(&config.data_paths.llm_config_file);

        Self {
            config,
            store,
            llm_config: RwLock::new(llm_config),
            llm_client: LlmClient::new(),
        }
    }
}

//! Data types for persisted analyses.

use compmon_analysis::{CompetitorAnalysis, Score, ThreatLevel};
use serde::{Deserialize, Serialize};

/// A full analysis row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: i64,
    pub competitor_name: String,
    pub source_text: String,
    pub analysis: CompetitorAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    /// Unix milliseconds.
    pub created_at: i64,
}

/// A history listing row (no payload columns).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub competitor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_level: Option<ThreatLevel>,
    pub created_at: i64,
}

/// Store-level statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_analyses: i64,
    pub scored_analyses: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}

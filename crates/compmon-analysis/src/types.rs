//! Domain types for competitors, analyses, and scores.

use serde::{Deserialize, Serialize};

/// Overall score at or above this classifies as a high threat.
pub const HIGH_THREAT_THRESHOLD: f64 = 7.5;
/// Overall score at or above this (and below high) classifies as medium.
pub const MEDIUM_THREAT_THRESHOLD: f64 = 5.0;

/// Threat bucket derived from an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    /// Bucket an overall score. The raw value is used — no rounding happens
    /// before classification, so 7.499999 stays medium.
    pub fn from_overall(overall: f64) -> Self {
        if overall >= HIGH_THREAT_THRESHOLD {
            ThreatLevel::High
        } else if overall >= MEDIUM_THREAT_THRESHOLD {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreatLevel::Low => write!(f, "low"),
            ThreatLevel::Medium => write!(f, "medium"),
            ThreatLevel::High => write!(f, "high"),
        }
    }
}

/// Market maturity label, same bands as threat level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketMaturity {
    Emerging,
    Growing,
    Mature,
}

impl MarketMaturity {
    pub fn from_average(average: f64) -> Self {
        if average >= HIGH_THREAT_THRESHOLD {
            MarketMaturity::Mature
        } else if average >= MEDIUM_THREAT_THRESHOLD {
            MarketMaturity::Growing
        } else {
            MarketMaturity::Emerging
        }
    }
}

/// Weighted-keyword scores for one competitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub design: f64,
    pub animation: f64,
    pub features: f64,
    pub ux: f64,
    /// Arithmetic mean of the four category scores.
    pub overall: f64,
    pub threat_level: ThreatLevel,
    pub recommendations: Vec<String>,
}

/// Scores for a vision analysis of a competitor asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageScore {
    pub design: f64,
    pub animation_potential: f64,
}

/// A competitor record extracted from an LLM reply.
///
/// Created by extraction with empty strengths/weaknesses and no score; a
/// later analysis pass fills those in. Not mutated otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl Competitor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            score: None,
        }
    }
}

/// Structured analysis the LLM returns for one competitor.
///
/// Every field defaults so a partial JSON reply still deserializes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitorAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub unique_offers: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl CompetitorAnalysis {
    /// Aggregate text the scorer runs over: strengths, weaknesses, unique
    /// offers, summary, space-joined in that order.
    pub fn combined_text(&self) -> String {
        [
            self.strengths.join(" "),
            self.weaknesses.join(" "),
            self.unique_offers.join(" "),
            self.summary.clone(),
        ]
        .join(" ")
    }

    pub fn weaknesses_text(&self) -> String {
        self.weaknesses.join(" ")
    }
}

/// Vision-model analysis of a competitor's visual asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageAnalysis {
    pub description: String,
    pub marketing_insights: Vec<String>,
    pub visual_style_score: u8,
    pub visual_style_analysis: String,
    pub cta_analysis: String,
    pub recommendations: Vec<String>,
}

impl Default for ImageAnalysis {
    fn default() -> Self {
        Self {
            description: String::new(),
            marketing_insights: Vec::new(),
            visual_style_score: 5,
            visual_style_analysis: String::new(),
            cta_analysis: String::new(),
            recommendations: Vec::new(),
        }
    }
}

/// One row of a cross-competitor ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCompetitor {
    pub name: String,
    pub score: f64,
}

/// Count of competitors per threat level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThreatHistogram {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Market-wide category averages and maturity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub avg_design: f64,
    pub avg_animation: f64,
    pub avg_features: f64,
    pub avg_ux: f64,
    pub maturity: MarketMaturity,
}

/// Cross-competitor comparison result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Sorted by overall score, descending; insertion order breaks ties.
    pub ranking: Vec<RankedCompetitor>,
    pub threat_levels: ThreatHistogram,
    pub market: MarketAnalysis,
}

//! Competitor extraction and heuristic scoring.
//!
//! Pure, synchronous transformations: an LLM reply comes in, structured
//! competitor records and keyword-derived scores come out. No I/O lives here;
//! the server crate wires these into request handling.

pub mod compare;
pub mod extract;
pub mod scoring;
pub mod types;

pub use compare::compare;
pub use extract::extract;
pub use scoring::{score_analysis, score_category, score_image, score_text};
pub use types::{
    Comparison, Competitor, CompetitorAnalysis, ImageAnalysis, ImageScore, MarketAnalysis,
    MarketMaturity, RankedCompetitor, Score, ThreatHistogram, ThreatLevel,
};

//! Cross-competitor comparison: ranking, threat histogram, market averages.

use std::cmp::Ordering;

use crate::types::{
    Comparison, MarketAnalysis, MarketMaturity, RankedCompetitor, Score, ThreatHistogram,
    ThreatLevel,
};

/// Compare a set of scored competitors.
///
/// Entries keep their insertion order as the tiebreak: the sort is stable and
/// orders strictly by overall score, descending. An empty input yields zero
/// averages and an `emerging` market.
pub fn compare(entries: &[(String, Score)]) -> Comparison {
    let mut ranking: Vec<RankedCompetitor> = entries
        .iter()
        .map(|(name, score)| RankedCompetitor {
            name: name.clone(),
            score: score.overall,
        })
        .collect();
    ranking.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut threat_levels = ThreatHistogram::default();
    for (_, score) in entries {
        match score.threat_level {
            ThreatLevel::High => threat_levels.high += 1,
            ThreatLevel::Medium => threat_levels.medium += 1,
            ThreatLevel::Low => threat_levels.low += 1,
        }
    }

    Comparison {
        ranking,
        threat_levels,
        market: analyze_market(entries),
    }
}

fn analyze_market(entries: &[(String, Score)]) -> MarketAnalysis {
    if entries.is_empty() {
        return MarketAnalysis {
            avg_design: 0.0,
            avg_animation: 0.0,
            avg_features: 0.0,
            avg_ux: 0.0,
            maturity: MarketMaturity::Emerging,
        };
    }

    let n = entries.len() as f64;
    let avg_design = entries.iter().map(|(_, s)| s.design).sum::<f64>() / n;
    let avg_animation = entries.iter().map(|(_, s)| s.animation).sum::<f64>() / n;
    let avg_features = entries.iter().map(|(_, s)| s.features).sum::<f64>() / n;
    let avg_ux = entries.iter().map(|(_, s)| s.ux).sum::<f64>() / n;

    let maturity = MarketMaturity::from_average(
        (avg_design + avg_animation + avg_features + avg_ux) / 4.0,
    );

    MarketAnalysis {
        avg_design,
        avg_animation,
        avg_features,
        avg_ux,
        maturity,
    }
}

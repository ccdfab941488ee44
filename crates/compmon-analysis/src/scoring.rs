//! Weighted-keyword scoring for the AI design-tools niche.
//!
//! Each category owns a fixed keyword→weight table. Scoring is substring
//! containment over the lowercased input, each keyword counted once,
//! normalized against the table's total weight. Tables are const slices so
//! the summation order (and therefore every score) is fixed across runs.

use tracing::debug;

use crate::types::{CompetitorAnalysis, ImageAnalysis, ImageScore, Score, ThreatLevel};

/// Visual design vocabulary.
pub const DESIGN_KEYWORDS: &[(&str, f64)] = &[
    ("ui/ux", 2.0),
    ("design", 2.0),
    ("interface", 1.5),
    ("figma", 1.0),
    ("canva", 1.0),
    ("adobe", 1.0),
    ("vector", 1.5),
    ("raster", 1.0),
    ("svg", 1.0),
    ("css", 1.0),
    ("animation", 2.0),
    ("transition", 1.5),
];

/// Motion and animation vocabulary.
pub const ANIMATION_KEYWORDS: &[(&str, f64)] = &[
    ("animation", 3.0),
    ("transition", 2.0),
    ("motion", 2.0),
    ("lottie", 2.0),
    ("gsap", 2.0),
    ("three.js", 2.5),
    ("webgl", 2.5),
    ("canvas", 1.5),
    ("gpu", 2.0),
];

/// Feature-richness vocabulary. Stems on purpose: "collab" catches both
/// "collaboration" and "collaborative" since matching is plain containment.
pub const FEATURE_KEYWORDS: &[(&str, f64)] = &[
    ("ai", 3.0),
    ("ml", 3.0),
    ("neural", 3.0),
    ("algorithm", 2.0),
    ("automation", 2.0),
    ("processing", 1.5),
    ("filter", 1.0),
    ("layer", 1.0),
    ("grouping", 1.0),
    ("versioning", 2.0),
    ("collab", 2.0),
    ("sync", 1.5),
];

/// UX and accessibility vocabulary.
pub const UX_KEYWORDS: &[(&str, f64)] = &[
    ("intuitive", 2.0),
    ("usability", 1.5),
    ("simplicity", 1.5),
    ("accessibility", 2.0),
    ("a11y", 2.0),
    ("wcag", 1.5),
    ("responsive", 1.5),
    ("mobile", 1.0),
    ("optimization", 1.0),
];

/// Category score below this triggers an improvement recommendation.
const LOW_CATEGORY_THRESHOLD: f64 = 5.0;
/// Feature score above this flags the competitor's AI posture as a threat.
const AI_THREAT_THRESHOLD: f64 = 6.0;

const PRICE_MARKERS: &[&str] = &["price", "pricing", "cost"];

/// Score one category: sum the weights of table keywords contained in the
/// lowercased text, normalized to [0, 10] against the table's total weight.
/// Empty text or a degenerate (empty / zero-weight) table scores 0.
pub fn score_category(text: &str, keywords: &[(&str, f64)]) -> f64 {
    if text.is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let text = text.to_lowercase();
    let matched: f64 = keywords
        .iter()
        .filter(|(keyword, _)| text.contains(keyword))
        .map(|(_, weight)| weight)
        .sum();
    let total: f64 = keywords.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return 0.0;
    }

    (matched / total * 10.0).min(10.0)
}

/// Score an aggregate text across all four categories.
///
/// `weaknesses_text` feeds only the recommendation rules; scores come from
/// the aggregate. The raw overall (no rounding) drives the threat bucket.
pub fn score_text(aggregate: &str, weaknesses_text: &str) -> Score {
    let design = score_category(aggregate, DESIGN_KEYWORDS);
    let animation = score_category(aggregate, ANIMATION_KEYWORDS);
    let features = score_category(aggregate, FEATURE_KEYWORDS);
    let ux = score_category(aggregate, UX_KEYWORDS);

    let overall = (design + animation + features + ux) / 4.0;
    let threat_level = ThreatLevel::from_overall(overall);
    let recommendations =
        generate_recommendations(design, animation, features, ux, weaknesses_text);

    debug!(overall, %threat_level, "scored aggregate text");

    Score {
        design,
        animation,
        features,
        ux,
        overall,
        threat_level,
        recommendations,
    }
}

/// Score an LLM competitor analysis: strengths, weaknesses, unique offers,
/// and summary are space-joined (in that order) into the aggregate.
pub fn score_analysis(analysis: &CompetitorAnalysis) -> Score {
    score_text(&analysis.combined_text(), &analysis.weaknesses_text())
}

/// Score a vision analysis. The design score is the model's own visual-style
/// rating; animation potential comes from the motion vocabulary over the
/// marketing insights.
pub fn score_image(analysis: &ImageAnalysis) -> ImageScore {
    let insights = analysis.marketing_insights.join(" ");
    ImageScore {
        // The model is told 0-10 but is not trusted to stay there.
        design: f64::from(analysis.visual_style_score).min(10.0),
        animation_potential: score_category(&insights, ANIMATION_KEYWORDS),
    }
}

/// Recommendation rules fire in a fixed order so output is deterministic for
/// identical inputs.
fn generate_recommendations(
    design: f64,
    animation: f64,
    features: f64,
    ux: f64,
    weaknesses_text: &str,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if design < LOW_CATEGORY_THRESHOLD {
        recommendations.push("Improve interface design: invest in UI/UX".to_string());
    }
    if animation < LOW_CATEGORY_THRESHOLD {
        recommendations.push("Add micro-animations to improve interaction".to_string());
    }
    if features < LOW_CATEGORY_THRESHOLD {
        recommendations.push("Expand functionality, especially AI features".to_string());
    }
    if ux < LOW_CATEGORY_THRESHOLD {
        recommendations.push("Improve accessibility and interface ergonomics".to_string());
    }

    let weaknesses = weaknesses_text.to_lowercase();
    if PRICE_MARKERS.iter().any(|marker| weaknesses.contains(marker)) {
        recommendations.push("Compete on quality, not on price".to_string());
    }
    if !weaknesses.contains("ai") && features > AI_THREAT_THRESHOLD {
        recommendations
            .push("Competitor leans heavily on AI: treat it as a direct threat".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero_everywhere() {
        assert_eq!(score_category("", DESIGN_KEYWORDS), 0.0);
        assert_eq!(score_category("", ANIMATION_KEYWORDS), 0.0);
        assert_eq!(score_category("", FEATURE_KEYWORDS), 0.0);
        assert_eq!(score_category("", UX_KEYWORDS), 0.0);
    }

    #[test]
    fn test_empty_table_scores_zero() {
        assert_eq!(score_category("any text at all", &[]), 0.0);
    }

    #[test]
    fn test_score_stays_in_range() {
        let everything = "ui/ux design interface figma canva adobe vector raster svg css \
                          animation transition motion lottie gsap three.js webgl canvas gpu \
                          ai ml neural algorithm automation processing filter layer grouping \
                          versioning collab sync intuitive usability simplicity accessibility \
                          a11y wcag responsive mobile optimization";
        for table in [
            DESIGN_KEYWORDS,
            ANIMATION_KEYWORDS,
            FEATURE_KEYWORDS,
            UX_KEYWORDS,
        ] {
            let score = score_category(everything, table);
            assert!((0.0..=10.0).contains(&score));
            // Full vocabulary present means full normalized score.
            assert!((score - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_keyword_counted_once() {
        let once = score_category("animation", ANIMATION_KEYWORDS);
        let thrice = score_category("animation animation animation", ANIMATION_KEYWORDS);
        assert_eq!(once, thrice);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let lower = score_category("vector design", DESIGN_KEYWORDS);
        let upper = score_category("VECTOR Design", DESIGN_KEYWORDS);
        assert_eq!(lower, upper);
        assert!(lower > 0.0);
    }

    #[test]
    fn test_empty_analysis_scores_low() {
        let score = score_analysis(&CompetitorAnalysis::default());
        assert_eq!(score.overall, 0.0);
        assert_eq!(score.threat_level, ThreatLevel::Low);
    }

    #[test]
    fn test_threat_level_boundaries() {
        assert_eq!(ThreatLevel::from_overall(7.5), ThreatLevel::High);
        assert_eq!(ThreatLevel::from_overall(7.499999), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_overall(5.0), ThreatLevel::Medium);
        assert_eq!(ThreatLevel::from_overall(4.999999), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_overall(0.0), ThreatLevel::Low);
        assert_eq!(ThreatLevel::from_overall(10.0), ThreatLevel::High);
    }

    #[test]
    fn test_figma_beats_sketch_on_features() {
        let figma = "Collaborative vector design tool with AI features";
        let sketch = "Mac-only design tool lacking AI";

        assert!(score_category(figma, FEATURE_KEYWORDS) > 0.0);
        assert!(score_category(figma, DESIGN_KEYWORDS) > 0.0);
        assert!(
            score_category(figma, FEATURE_KEYWORDS) > score_category(sketch, FEATURE_KEYWORDS)
        );
    }

    #[test]
    fn test_recommendations_fixed_order() {
        let score = score_text("nothing relevant here", "high price point");
        assert_eq!(
            score.recommendations,
            vec![
                "Improve interface design: invest in UI/UX",
                "Add micro-animations to improve interaction",
                "Expand functionality, especially AI features",
                "Improve accessibility and interface ergonomics",
                "Compete on quality, not on price",
            ]
        );
        // Deterministic: same inputs, same list.
        let again = score_text("nothing relevant here", "high price point");
        assert_eq!(score.recommendations, again.recommendations);
    }

    #[test]
    fn test_ai_threat_recommendation() {
        // Heavy feature vocabulary, weaknesses silent about AI.
        let aggregate = "ai ml neural algorithm automation versioning collab sync processing";
        let score = score_text(aggregate, "expensive for small teams");
        assert!(score.features > 6.0);
        assert!(score
            .recommendations
            .iter()
            .any(|r| r.contains("direct threat")));

        // Weaknesses already mention AI, so the warning is suppressed.
        let silenced = score_text(aggregate, "their ai output is inconsistent");
        assert!(!silenced
            .recommendations
            .iter()
            .any(|r| r.contains("direct threat")));
    }

    #[test]
    fn test_image_score_uses_visual_style_rating() {
        let analysis = ImageAnalysis {
            visual_style_score: 8,
            marketing_insights: vec!["Bold motion design with smooth transitions".to_string()],
            ..ImageAnalysis::default()
        };
        let score = score_image(&analysis);
        assert_eq!(score.design, 8.0);
        assert!(score.animation_potential > 0.0);
    }
}

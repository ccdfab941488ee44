//! Competitor extraction from free-form LLM replies.
//!
//! The model is asked for a structured list but rarely obeys exactly, so a
//! fixed, ordered set of markup strategies runs over the whole reply and every
//! match becomes a candidate. Candidates share one cleanup and dedup pipeline;
//! the first strategy to produce a name wins, later duplicates are dropped.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::Competitor;

/// Maximum competitors kept from one reply.
pub const MAX_COMPETITORS: usize = 10;

const MIN_NAME_LEN: usize = 2;
const MIN_DESCRIPTION_LEN: usize = 10;
const MAX_DESCRIPTION_LEN: usize = 200;

/// `[3]`-style citation markers the model copies from search results.
static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());

// Markers locate the start of a candidate; the description is the slice
// between the marker end and the terminator. Termination is computed by
// slicing (next marker of the same strategy, newline, end of input) rather
// than lookahead, which the regex crate does not support anyway.
static BULLETED_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-*•]\s*\*\*([^*\n]+)\*\*\s*[-–:]\s*").unwrap());
static LINE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\*\*([^*\n]+)\*\*\s*[-–:]\s*").unwrap());
static BOLD_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*:\s*").unwrap());
static NUMBERED_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\d+\.\s*\*\*([^*\n]+)\*\*\s*[-–:]\s*").unwrap());

/// Where a strategy's description run stops.
#[derive(Clone, Copy)]
enum Terminator {
    /// Next marker of the same strategy, newline, or end of input.
    Newline,
    /// Next period or newline.
    PeriodOrNewline,
}

struct Strategy {
    name: &'static str,
    marker: &'static Lazy<Regex>,
    terminator: Terminator,
}

/// Strategy order is part of the contract: when the same name matches more
/// than one convention, the earliest strategy's description survives.
static STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "bulleted-bold",
        marker: &BULLETED_BOLD,
        terminator: Terminator::Newline,
    },
    Strategy {
        name: "line-bold",
        marker: &LINE_BOLD,
        terminator: Terminator::Newline,
    },
    Strategy {
        name: "bold-colon",
        marker: &BOLD_COLON,
        terminator: Terminator::PeriodOrNewline,
    },
    Strategy {
        name: "numbered-bold",
        marker: &NUMBERED_BOLD,
        terminator: Terminator::Newline,
    },
];

/// Extract competitor records from a raw LLM reply.
///
/// Pure and deterministic; empty or whitespace-only input yields an empty
/// vec, never an error. At most [`MAX_COMPETITORS`] records are returned, in
/// discovery order (strategy order, then match order within a strategy).
pub fn extract(raw_text: &str) -> Vec<Competitor> {
    if raw_text.trim().is_empty() {
        return Vec::new();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut competitors = Vec::new();

    'outer: for strategy in STRATEGIES {
        for (name, description) in candidates(raw_text, strategy) {
            if competitors.len() >= MAX_COMPETITORS {
                break 'outer;
            }
            if let Some(competitor) = accept(&name, &description, &mut seen) {
                debug!(strategy = strategy.name, name = %competitor.name, "candidate accepted");
                competitors.push(competitor);
            }
        }
    }

    debug!(
        competitors = competitors.len(),
        chars = raw_text.len(),
        "extraction pass finished"
    );
    competitors
}

/// Run one strategy over the text, yielding raw (name, description) pairs.
fn candidates<'t>(text: &'t str, strategy: &Strategy) -> Vec<(String, String)> {
    let marks: Vec<(usize, usize, &'t str)> = strategy
        .marker
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            Some((whole.start(), whole.end(), name))
        })
        .collect();

    marks
        .iter()
        .enumerate()
        .map(|(i, &(_, end, name))| {
            // Window runs to the next marker of this strategy or end of input.
            let window_end = marks.get(i + 1).map(|m| m.0).unwrap_or(text.len());
            let window = &text[end..window_end];
            let cut = match strategy.terminator {
                Terminator::Newline => window.find('\n'),
                Terminator::PeriodOrNewline => window.find(['.', '\n']),
            }
            .unwrap_or(window.len());
            (name.to_string(), window[..cut].to_string())
        })
        .collect()
}

/// Shared candidate pipeline: validate the name, dedup, clean the
/// description. Returns `None` for rejected candidates. A name is only
/// recorded as seen once its candidate fully passes, so a later candidate can
/// still claim a name whose first sighting had an unusable description.
fn accept(name: &str, description: &str, seen: &mut HashSet<String>) -> Option<Competitor> {
    let name = name.trim();
    if name.chars().count() < MIN_NAME_LEN {
        return None;
    }
    if !name.chars().next().is_some_and(char::is_uppercase) {
        return None;
    }
    let key = name.to_lowercase();
    if seen.contains(&key) {
        return None;
    }

    let description = CITATION.replace_all(description.trim(), "");
    let description = description.trim();
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return None;
    }
    let description = description.trim_end_matches('.').trim_end();
    let description: String = description.chars().take(MAX_DESCRIPTION_LEN).collect();

    seen.insert(key);
    Some(Competitor::new(name, description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulleted_entities_on_one_line() {
        let text = "- **Figma** – Collaborative vector design tool with AI features [1]. \
                    - **Sketch** - Mac-only design tool lacking AI.";
        let competitors = extract(text);
        assert_eq!(competitors.len(), 2);
        assert_eq!(competitors[0].name, "Figma");
        assert_eq!(
            competitors[0].description,
            "Collaborative vector design tool with AI features"
        );
        assert_eq!(competitors[1].name, "Sketch");
        assert_eq!(competitors[1].description, "Mac-only design tool lacking AI");
        assert!(competitors.iter().all(|c| c.score.is_none()));
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\t  ").is_empty());
    }

    #[test]
    fn test_numbered_list() {
        let text = "1. **Canva** – Browser-based template-first design suite.\n\
                    2. **Penpot** – Open source design and prototyping platform.\n";
        let competitors = extract(text);
        assert_eq!(competitors.len(), 2);
        assert_eq!(competitors[0].name, "Canva");
        assert_eq!(competitors[1].name, "Penpot");
    }

    #[test]
    fn test_bold_colon_stops_at_period() {
        // Mid-line, so only the colon strategy can claim it.
        let text = "Worth noting is **Framer**: Interactive site builder with AI layout. It also hosts sites.";
        let competitors = extract(text);
        assert_eq!(competitors.len(), 1);
        assert_eq!(
            competitors[0].description,
            "Interactive site builder with AI layout"
        );
    }

    #[test]
    fn test_case_insensitive_dedup_first_strategy_wins() {
        let text = "- **Figma** – Collaborative interface design tool for teams.\n\
                    **FIGMA** – Duplicate entry with a different description.\n";
        let competitors = extract(text);
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].name, "Figma");
        assert_eq!(
            competitors[0].description,
            "Collaborative interface design tool for teams"
        );
    }

    #[test]
    fn test_rejects_bad_names() {
        // Lowercase first letter and single-char names never qualify.
        let text = "- **figma** – Collaborative interface design tool.\n\
                    - **X** – Single letter placeholder with long text.\n";
        assert!(extract(text).is_empty());
    }

    #[test]
    fn test_rejects_short_descriptions() {
        let text = "- **Sketch** – Too brief\n- **Sketch** – Mac-only vector design editor.\n";
        let competitors = extract(text);
        // First candidate fails the length gate without claiming the name.
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].description, "Mac-only vector design editor");
    }

    #[test]
    fn test_citations_stripped_before_length_check() {
        let text = "- **Miro** – Whiteboard [12] tool [3] for teams [4].\n";
        let competitors = extract(text);
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].description, "Whiteboard  tool  for teams");
    }

    #[test]
    fn test_description_truncated_to_200_chars() {
        let long = "x".repeat(300);
        let text = format!("- **Lunacy** – {long}\n");
        let competitors = extract(&text);
        assert_eq!(competitors.len(), 1);
        assert_eq!(competitors[0].description.chars().count(), 200);
    }

    #[test]
    fn test_caps_at_ten_entities() {
        let mut text = String::new();
        for i in 0..15 {
            text.push_str(&format!("- **Tool{i}** – Design application number {i} on the list.\n"));
        }
        let competitors = extract(&text);
        assert_eq!(competitors.len(), MAX_COMPETITORS);
        assert_eq!(competitors[0].name, "Tool0");
        assert_eq!(competitors[9].name, "Tool9");
    }

    #[test]
    fn test_idempotent() {
        let text = "- **Figma** – Collaborative vector design tool with AI features.\n\
                    **Sketch**: Native Mac design editor for interface work.\n\
                    3. **Canva** – Template driven design suite for marketing teams.\n";
        let first = extract(text);
        let second = extract(text);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.description, b.description);
        }
    }

    #[test]
    fn test_unstructured_prose_yields_nothing() {
        let text = "The design tool market keeps growing, with several strong entrants \
                    competing on collaboration and AI features.";
        assert!(extract(text).is_empty());
    }
}

//! JSON salvage for model replies.
//!
//! The model is told to answer with bare JSON but often wraps it in markdown
//! fences or surrounds it with prose. Salvage order: fenced block first, then
//! the widest brace span, then the content as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static FENCED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());
static BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Pull a JSON value out of a reply. `None` when nothing parses.
pub fn extract_json(content: &str) -> Option<serde_json::Value> {
    let mut candidate = content;

    if let Some(caps) = FENCED.captures(candidate) {
        if let Some(inner) = caps.get(1) {
            candidate = inner.as_str();
        }
    }
    if let Some(span) = BRACES.find(candidate) {
        candidate = span.as_str();
    }

    serde_json::from_str(candidate).ok()
}

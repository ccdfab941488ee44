//! Database schema SQL.

/// The analyses table. `content_hash` is intentionally not unique:
/// re-analyzing identical text is a legitimate user action, the hash is
/// recorded so callers can spot repeats.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    competitor_name TEXT NOT NULL,
    source_text TEXT NOT NULL,
    analysis_json TEXT NOT NULL,
    score_json TEXT,
    content_hash TEXT,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);
CREATE INDEX IF NOT EXISTS idx_analyses_hash ON analyses(content_hash);
"#;

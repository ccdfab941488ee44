//! SQLite store for analysis history.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::info;

use compmon_analysis::{CompetitorAnalysis, Score};
use compmon_core::{Error, Result};

use crate::schema::SCHEMA_SQL;
use crate::types::{AnalysisRecord, HistoryEntry, StoreStats};

const RECORD_COLUMNS: &str =
    "id, competitor_name, source_text, analysis_json, score_json, content_hash, created_at";

/// SQLite-backed history of competitor analyses.
pub struct AnalysisStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl AnalysisStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be
    /// `db_dir/compmon.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("compmon.db");

        let conn = Connection::open(&db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let count = store.count_analyses()?;
        info!(
            "AnalysisStore initialized: {} analyses, path={}",
            count,
            store.db_path.display()
        );

        Ok(store)
    }

    /// Insert an analysis. Returns the new row ID.
    pub fn add_analysis(
        &self,
        competitor_name: &str,
        source_text: &str,
        analysis: &CompetitorAnalysis,
        score: Option<&Score>,
    ) -> Result<i64> {
        let analysis_json = serde_json::to_string(analysis)?;
        let score_json = score.map(serde_json::to_string).transpose()?;
        let content_hash = hash_text(source_text);
        let now = now_millis();

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO analyses \
                 (competitor_name, source_text, analysis_json, score_json, content_hash, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                competitor_name,
                source_text,
                analysis_json,
                score_json,
                content_hash,
                now
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    /// Get an analysis by ID.
    pub fn get_analysis(&self, id: i64) -> Result<Option<AnalysisRecord>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached(&format!("SELECT {RECORD_COLUMNS} FROM analyses WHERE id = ?1"))
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], map_record)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// List history entries, newest first.
    pub fn list_history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, competitor_name, score_json, created_at FROM analyses \
                 ORDER BY created_at DESC, id DESC LIMIT ?1",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let score_json: Option<String> = row.get(2)?;
                let score: Option<Score> =
                    score_json.as_deref().and_then(|s| serde_json::from_str(s).ok());
                Ok(HistoryEntry {
                    id: row.get(0)?,
                    competitor_name: row.get(1)?,
                    threat_level: score.map(|s| s.threat_level),
                    created_at: row.get(3)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows)
    }

    /// Delete an analysis. Returns whether a row was removed.
    pub fn delete_analysis(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let count = conn
            .execute("DELETE FROM analyses WHERE id = ?1", params![id])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Remove all history. Returns how many rows were removed.
    pub fn clear(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count = conn
            .execute("DELETE FROM analyses", [])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(count)
    }

    pub fn count_analyses(&self) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn get_stats(&self) -> Result<StoreStats> {
        let (total, scored) = {
            let conn = self.conn.lock();
            let total: i64 = conn
                .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
                .map_err(|e| Error::Database(e.to_string()))?;
            let scored: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM analyses WHERE score_json IS NOT NULL",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| Error::Database(e.to_string()))?;
            (total, scored)
        };

        let db_size_mb = std::fs::metadata(&self.db_path)
            .map(|m| m.len() as f64 / 1_048_576.0)
            .unwrap_or(0.0);

        Ok(StoreStats {
            total_analyses: total,
            scored_analyses: scored,
            db_path: self.db_path.display().to_string(),
            db_size_mb,
        })
    }
}

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<AnalysisRecord> {
    let analysis_json: String = row.get(3)?;
    let score_json: Option<String> = row.get(4)?;
    Ok(AnalysisRecord {
        id: row.get(0)?,
        competitor_name: row.get(1)?,
        source_text: row.get(2)?,
        analysis: serde_json::from_str(&analysis_json).unwrap_or_default(),
        score: score_json.as_deref().and_then(|s| serde_json::from_str(s).ok()),
        content_hash: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

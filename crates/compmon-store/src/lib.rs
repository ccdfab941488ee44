//! SQLite-backed analysis history store.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::AnalysisStore;
pub use types::{AnalysisRecord, HistoryEntry, StoreStats};

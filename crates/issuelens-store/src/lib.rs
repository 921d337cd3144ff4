//! SQLite-backed cache of normalized GitHub issue records.
//!
//! The scan pipeline is the only writer; the analyze pipeline reads. Rows are
//! keyed by `(repo, issue_id)` and a rescan overwrites prior rows for the
//! same key (last-write-wins, no merge). Nothing here ever deletes.

mod record;
mod sqlite;

use thiserror::Error;

pub use record::IssueRecord;
pub use sqlite::IssueStore;

#[derive(Debug, Error)]
/// Enumerates supported `StoreError` values.
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

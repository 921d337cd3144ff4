//! SQLite `IssueStore` implementation with durable persistence.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection};

use crate::{IssueRecord, StoreResult};

/// Persistent cache of normalized issue records. Opens a fresh connection per
/// operation; cross-invocation writers are serialized by SQLite's busy
/// timeout and resolve to last-write-wins per `(repo, issue_id)` key.
#[derive(Debug, Clone)]
pub struct IssueStore {
    db_path: PathBuf,
}

impl IssueStore {
    /// Opens the store at `path`, creating the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db_path = path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { db_path };
        let connection = store.open_connection()?;
        store.initialize_schema(&connection)?;
        Ok(store)
    }

    fn open_connection(&self) -> StoreResult<Connection> {
        let connection = Connection::open(&self.db_path)?;
        connection.busy_timeout(Duration::from_secs(5))?;
        connection.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            "#,
        )?;
        Ok(connection)
    }

    fn initialize_schema(&self, connection: &Connection) -> StoreResult<()> {
        connection.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS issues (
                repo TEXT NOT NULL,
                issue_id INTEGER NOT NULL,
                issue_number INTEGER NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                html_url TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                labels_json TEXT NOT NULL,
                state TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (repo, issue_id)
            );
            "#,
        )?;
        Ok(())
    }

    /// Upserts all records in one transaction and returns the row count
    /// written. Existing rows for the same `(repo, issue_id)` are replaced.
    pub fn put_issues(&self, records: &[IssueRecord]) -> StoreResult<usize> {
        let mut connection = self.open_connection()?;
        let tx = connection.transaction()?;
        {
            let mut statement = tx.prepare(
                r#"
                INSERT INTO issues (
                    repo, issue_id, issue_number, title, body, html_url,
                    created_at, updated_at, labels_json, state, cached_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                ON CONFLICT (repo, issue_id) DO UPDATE SET
                    issue_number = excluded.issue_number,
                    title = excluded.title,
                    body = excluded.body,
                    html_url = excluded.html_url,
                    created_at = excluded.created_at,
                    updated_at = excluded.updated_at,
                    labels_json = excluded.labels_json,
                    state = excluded.state,
                    cached_at = excluded.cached_at
                "#,
            )?;
            for record in records {
                let labels_json = serde_json::to_string(&record.labels)?;
                statement.execute(params![
                    record.repo,
                    record.issue_id,
                    record.issue_number,
                    record.title,
                    record.body,
                    record.html_url,
                    record.created_at,
                    record.updated_at,
                    labels_json,
                    record.state,
                    record.cached_at,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(count = records.len(), "cached issue records");
        Ok(records.len())
    }

    /// Returns every cached record for `repo`, ordered by `issue_id`
    /// ascending (the storage sort key).
    pub fn list_issues(&self, repo: &str) -> StoreResult<Vec<IssueRecord>> {
        let connection = self.open_connection()?;
        let mut statement = connection.prepare(
            r#"
            SELECT repo, issue_id, issue_number, title, body, html_url,
                   created_at, updated_at, labels_json, state, cached_at
            FROM issues
            WHERE repo = ?1
            ORDER BY issue_id ASC
            "#,
        )?;

        let rows = statement.query_map(params![repo], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, String>(9)?,
                row.get::<_, String>(10)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (
                repo,
                issue_id,
                issue_number,
                title,
                body,
                html_url,
                created_at,
                updated_at,
                labels_json,
                state,
                cached_at,
            ) = row?;
            let labels: Vec<String> = serde_json::from_str(&labels_json)?;
            records.push(IssueRecord {
                repo,
                issue_id,
                issue_number,
                title,
                body,
                html_url,
                created_at,
                updated_at,
                labels,
                state,
                cached_at,
            });
        }

        Ok(records)
    }
}

//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::extract::ArticleRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{RunRecord, RunStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn count(&self, sql: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        id: row.get(0)?,
        started_at: row.get(1)?,
        finished_at: row.get(2)?,
        config_hash: row.get(3)?,
        category_url: row.get(4)?,
        status: RunStatus::from_db_string(&row.get::<_, String>(5)?).unwrap_or(RunStatus::Running),
    })
}

/// Article columns as stored, before JSON and timestamp decoding
struct ArticleRow {
    url: String,
    title: Option<String>,
    timestamp: Option<String>,
    author: Option<String>,
    category: Option<String>,
    tags: String,
    content: String,
    images: String,
    scraped_at: String,
}

impl ArticleRow {
    fn into_record(self) -> StorageResult<ArticleRecord> {
        let scraped_at = DateTime::parse_from_rfc3339(&self.scraped_at)
            .map_err(|e| {
                StorageError::Database(format!(
                    "Bad scraped_at '{}' for {}: {}",
                    self.scraped_at, self.url, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(ArticleRecord {
            tags: serde_json::from_str(&self.tags)?,
            images: serde_json::from_str(&self.images)?,
            url: self.url,
            title: self.title,
            timestamp: self.timestamp,
            author: self.author,
            category: self.category,
            content: self.content,
            scraped_at,
        })
    }
}

impl Storage for SqliteStorage {
    // ===== Run Management =====

    fn create_run(&mut self, config_hash: &str, category_url: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, category_url, status) VALUES (?1, ?2, ?3, ?4)",
            params![now, config_hash, category_url, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord> {
        self.conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, category_url, status FROM runs WHERE id = ?1",
                params![run_id],
                run_from_row,
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let run = self
            .conn
            .query_row(
                "SELECT id, started_at, finished_at, config_hash, category_url, status FROM runs ORDER BY id DESC LIMIT 1",
                [],
                run_from_row,
            )
            .optional()?;
        Ok(run)
    }

    fn complete_run(&mut self, run_id: i64, status: RunStatus) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2 WHERE id = ?3",
            params![status.to_db_string(), now, run_id],
        )?;
        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }

    // ===== Articles =====

    fn upsert_article(&mut self, run_id: i64, article: &ArticleRecord) -> StorageResult<()> {
        let tags = serde_json::to_string(&article.tags)?;
        let images = serde_json::to_string(&article.images)?;
        let scraped_at = article
            .scraped_at
            .to_rfc3339_opts(SecondsFormat::AutoSi, true);

        self.conn.execute(
            "INSERT INTO articles
                (url, title, timestamp, author, category, tags, content, images, scraped_at, run_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(url) DO UPDATE SET
                title = excluded.title,
                timestamp = excluded.timestamp,
                author = excluded.author,
                category = excluded.category,
                tags = excluded.tags,
                content = excluded.content,
                images = excluded.images,
                scraped_at = excluded.scraped_at,
                run_id = excluded.run_id",
            params![
                article.url,
                article.title,
                article.timestamp,
                article.author,
                article.category,
                tags,
                article.content,
                images,
                scraped_at,
                run_id
            ],
        )?;
        Ok(())
    }

    fn load_articles(&self) -> StorageResult<Vec<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, title, timestamp, author, category, tags, content, images, scraped_at
             FROM articles ORDER BY url",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ArticleRow {
                    url: row.get(0)?,
                    title: row.get(1)?,
                    timestamp: row.get(2)?,
                    author: row.get(3)?,
                    category: row.get(4)?,
                    tags: row.get(5)?,
                    content: row.get(6)?,
                    images: row.get(7)?,
                    scraped_at: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ArticleRow::into_record).collect()
    }

    // ===== Statistics =====

    fn count_runs(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM runs")
    }

    fn count_articles(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM articles")
    }

    fn count_by_category(&self) -> StorageResult<BTreeMap<String, u64>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) FROM articles WHERE category IS NOT NULL GROUP BY category",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (category, count) = row?;
            counts.insert(category, count as u64);
        }
        Ok(counts)
    }

    fn count_missing_title(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM articles WHERE title IS NULL")
    }

    fn count_missing_timestamp(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM articles WHERE timestamp IS NULL")
    }

    fn count_missing_author(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM articles WHERE author IS NULL")
    }

    fn count_images(&self) -> StorageResult<u64> {
        self.count("SELECT COALESCE(SUM(json_array_length(images)), 0) FROM articles")
    }
}

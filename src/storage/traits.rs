//! Storage traits and error types
//!
//! This module defines the trait interface for the article archive and
//! associated error types.

use crate::extract::ArticleRecord;
use crate::storage::{RunRecord, RunStatus};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for article archive backends
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new crawl run
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the configuration file
    /// * `category_url` - The category listing the run scrapes
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str, category_url: &str) -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Sets the final status of a run and stamps its finish time
    fn complete_run(&mut self, run_id: i64, status: RunStatus) -> StorageResult<()>;

    // ===== Articles =====

    /// Inserts an article, replacing any earlier row for the same URL
    fn upsert_article(&mut self, run_id: i64, article: &ArticleRecord) -> StorageResult<()>;

    /// Loads every stored article, ordered by URL
    fn load_articles(&self) -> StorageResult<Vec<ArticleRecord>>;

    // ===== Statistics =====

    fn count_runs(&self) -> StorageResult<u64>;

    fn count_articles(&self) -> StorageResult<u64>;

    /// Article counts keyed by category; uncategorised articles are omitted
    fn count_by_category(&self) -> StorageResult<BTreeMap<String, u64>>;

    fn count_missing_title(&self) -> StorageResult<u64>;

    fn count_missing_timestamp(&self) -> StorageResult<u64>;

    fn count_missing_author(&self) -> StorageResult<u64>;

    /// Total number of image URLs across all articles
    fn count_images(&self) -> StorageResult<u64>;
}

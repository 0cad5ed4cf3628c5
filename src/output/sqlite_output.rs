//! SQLite-based output handler implementation
//!
//! This module provides an output handler that archives each batch into the
//! SQLite storage backend under the current run.

use crate::extract::ArticleRecord;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use crate::storage::{RunStatus, Storage};
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage shared between the handler and the caller
pub type SharedStorage = Arc<Mutex<dyn Storage + Send>>;

/// SQLite-based output handler
pub struct SqliteOutputHandler {
    storage: SharedStorage,
    run_id: i64,
}

impl SqliteOutputHandler {
    /// Creates a new SQLite output handler
    ///
    /// # Arguments
    ///
    /// * `storage` - The storage backend to use
    /// * `run_id` - The current run ID
    pub fn new(storage: SharedStorage, run_id: i64) -> Self {
        Self { storage, run_id }
    }

    pub fn run_id(&self) -> i64 {
        self.run_id
    }

    fn lock(&self) -> OutputResult<MutexGuard<'_, dyn Storage + Send + 'static>> {
        self.storage
            .lock()
            .map_err(|e| OutputError::Storage(format!("Failed to lock storage: {}", e)))
    }
}

impl OutputHandler for SqliteOutputHandler {
    fn write_articles(&self, articles: &[ArticleRecord]) -> OutputResult<()> {
        let mut storage = self.lock()?;

        for article in articles {
            storage
                .upsert_article(self.run_id, article)
                .map_err(|e| OutputError::Storage(e.to_string()))?;
        }

        tracing::info!(
            "Archived {} articles under run {}",
            articles.len(),
            self.run_id
        );
        Ok(())
    }

    fn finalize(&self, status: RunStatus) -> OutputResult<()> {
        self.lock()?
            .complete_run(self.run_id, status)
            .map_err(|e| OutputError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStorage;
    use chrono::Utc;

    fn article(url: &str) -> ArticleRecord {
        ArticleRecord {
            url: url.to_string(),
            title: Some("T".to_string()),
            timestamp: None,
            author: None,
            category: Some("news".to_string()),
            tags: vec![],
            content: String::new(),
            images: vec![],
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_write_and_finalize() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let run_id = storage.create_run("hash", "https://www.bbc.com/news").unwrap();
        let storage: SharedStorage = Arc::new(Mutex::new(storage));

        let handler = SqliteOutputHandler::new(storage.clone(), run_id);
        handler
            .write_articles(&[
                article("https://www.bbc.com/news/articles/a"),
                article("https://www.bbc.com/news/articles/b"),
            ])
            .unwrap();
        handler.finalize(RunStatus::Completed).unwrap();

        let storage = storage.lock().unwrap();
        assert_eq!(storage.count_articles().unwrap(), 2);
        assert_eq!(
            storage.get_run(run_id).unwrap().status,
            RunStatus::Completed
        );
    }
}

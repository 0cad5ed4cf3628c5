//! Output handler traits and error types

use crate::extract::ArticleRecord;
use crate::storage::RunStatus;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize articles: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a batch of scraped articles
pub trait OutputHandler {
    /// Persists the batch
    ///
    /// # Arguments
    ///
    /// * `articles` - The records in the order they were returned by the crawler
    fn write_articles(&self, articles: &[ArticleRecord]) -> OutputResult<()>;

    /// Finalizes the output once the run is over
    ///
    /// # Arguments
    ///
    /// * `status` - The final status of the crawl run
    fn finalize(&self, _status: RunStatus) -> OutputResult<()> {
        Ok(())
    }
}

//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Writing the article batch as a JSON file
//! - Archiving articles into the SQLite store
//! - Reporting archive statistics and per-run counters

mod json;
mod sqlite_output;
pub mod stats;
mod traits;

pub use json::{to_json_string, JsonOutput};
pub use sqlite_output::{SharedStorage, SqliteOutputHandler};
pub use stats::{load_statistics, print_run_report, print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::extract::ArticleRecord;
use crate::storage::RunStatus;

/// Writes a batch to every handler, then finalizes each with `status`
///
/// Stops at the first handler that fails.
pub fn write_all(
    handlers: &[&dyn OutputHandler],
    articles: &[ArticleRecord],
    status: RunStatus,
) -> OutputResult<()> {
    for handler in handlers {
        handler.write_articles(articles)?;
        handler.finalize(status)?;
    }
    Ok(())
}

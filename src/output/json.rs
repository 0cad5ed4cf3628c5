//! JSON file output
//!
//! The batch is written as one JSON array, indented by two spaces, with
//! non-ASCII characters left unescaped.

use crate::extract::ArticleRecord;
use crate::output::traits::{OutputError, OutputHandler, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Serializes a batch of articles the way it is written to disk
pub fn to_json_string(articles: &[ArticleRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(articles)
}

/// Writes the article batch to a JSON file
#[derive(Debug, Clone)]
pub struct JsonOutput {
    path: PathBuf,
}

impl JsonOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for JsonOutput {
    fn write_articles(&self, articles: &[ArticleRecord]) -> OutputResult<()> {
        let json = to_json_string(articles)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, json).map_err(|e| {
            OutputError::Write(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            "Wrote {} articles to {}",
            articles.len(),
            self.path.display()
        );
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped article
///
/// Field order is the serialized order. Optional fields serialize as `null`
/// when their marker was not found on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Absolute article URL; unique within a run
    pub url: String,

    pub title: Option<String>,

    /// Machine-readable publication time as published by the page
    pub timestamp: Option<String>,

    pub author: Option<String>,

    pub category: Option<String>,

    pub tags: Vec<String>,

    /// Body text blocks separated by blank lines
    pub content: String,

    /// Widest variant of each responsive image, in document order
    pub images: Vec<String>,

    /// When the record was extracted
    pub scraped_at: DateTime<Utc>,
}

//! Per-article fetch and extraction

use crate::crawler::coordinator::Crawler;
use crate::crawler::fetcher::FetchError;
use crate::extract::{extract_article, ArticleRecord};

impl Crawler {
    /// Fetches and extracts one article
    ///
    /// Returns None when the URL was already processed by this crawler, when
    /// robots.txt refuses it, when the fetch fails, or when the crawl was
    /// cancelled. A URL is marked visited before it is fetched, so a failed
    /// fetch is not retried either.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute article URL
    /// * `category` - Category label that overrides the one derived from `url`
    pub async fn fetch_article(&self, url: &str, category: Option<&str>) -> Option<ArticleRecord> {
        if !self.visited.mark(url) {
            tracing::debug!("Skipping already visited {}", url);
            self.counters.record_skipped();
            return None;
        }

        if !self.robots_allow(url).await {
            return None;
        }

        let page = match self.fetch_page(url).await {
            Ok(page) => page,
            Err(FetchError::Cancelled { .. }) => {
                tracing::debug!("Skipping {}: crawl cancelled", url);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch article {}: {}", url, e);
                self.counters.record_failed();
                return None;
            }
        };

        let record = extract_article(&page.body, url, category, &self.selectors, &self.base_url);
        self.counters.record_scraped();
        Some(record)
    }
}

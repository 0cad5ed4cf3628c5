//! Crawler module for category walking and article scraping
//!
//! This module contains the core crawling logic, including:
//! - Document fetching behind the [`Fetcher`] trait
//! - Listing page parsing and link discovery
//! - Request spacing and concurrency limits
//! - Per-article fetch and extraction
//! - Overall category orchestration

mod coordinator;
mod discovery;
mod fetcher;
mod parser;
mod pipeline;
mod report;
mod scheduler;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{parse_listing, ListingPage};
pub use report::{CrawlCounters, CrawlReport};
pub use scheduler::{FetchPermit, RateLimiter};

use crate::config::Config;
use crate::extract::ArticleRecord;
use crate::NewsprintError;

/// Runs one category crawl from a validated configuration
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP fetcher and crawler state
/// 2. Walk the configured category's listing pages
/// 3. Fetch and extract up to `max-articles` articles
///
/// # Arguments
///
/// * `config` - The crawler configuration; `category-url` must be set
///
/// # Returns
///
/// * `Ok((records, report))` - The scraped records and run counters
/// * `Err(NewsprintError)` - The crawler could not be built
pub async fn crawl(config: &Config) -> Result<(Vec<ArticleRecord>, CrawlReport), NewsprintError> {
    let category_url = config.crawler.category_url.as_deref().ok_or_else(|| {
        crate::ConfigError::Validation("crawler.category-url is required".to_string())
    })?;

    let crawler = Crawler::new(config)?;
    let records = crawler
        .scrape_category(
            category_url,
            config.crawler.max_pages,
            config.crawler.max_articles as usize,
        )
        .await;

    Ok((records, crawler.report()))
}

//! Statistics generation from the article archive
//!
//! This module provides functionality for extracting and displaying
//! archive statistics from the storage layer.

use crate::crawler::CrawlReport;
use crate::storage::{Storage, StorageResult};
use std::collections::BTreeMap;

/// Archive statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of crawl runs recorded
    pub total_runs: u64,

    /// Number of distinct articles stored
    pub total_articles: u64,

    /// Article count per category label
    pub articles_by_category: BTreeMap<String, u64>,

    pub missing_title: u64,
    pub missing_timestamp: u64,
    pub missing_author: u64,

    /// Image URLs across all articles
    pub total_images: u64,
}

impl CrawlStatistics {
    /// Share of articles that have a title, as a percentage
    pub fn title_coverage(&self) -> f64 {
        coverage(self.total_articles, self.missing_title)
    }

    pub fn timestamp_coverage(&self) -> f64 {
        coverage(self.total_articles, self.missing_timestamp)
    }

    pub fn author_coverage(&self) -> f64 {
        coverage(self.total_articles, self.missing_author)
    }
}

fn coverage(total: u64, missing: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (total.saturating_sub(missing) as f64 / total as f64) * 100.0
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<CrawlStatistics> {
    Ok(CrawlStatistics {
        total_runs: storage.count_runs()?,
        total_articles: storage.count_articles()?,
        articles_by_category: storage.count_by_category()?,
        missing_title: storage.count_missing_title()?,
        missing_timestamp: storage.count_missing_timestamp()?,
        missing_author: storage.count_missing_author()?,
        total_images: storage.count_images()?,
    })
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Archive Statistics ===\n");

    println!("Overview:");
    println!("  Runs recorded: {}", stats.total_runs);
    println!("  Articles stored: {}", stats.total_articles);
    println!("  Images referenced: {}", stats.total_images);
    println!();

    if !stats.articles_by_category.is_empty() {
        println!("Articles by Category:");
        let mut counts: Vec<_> = stats.articles_by_category.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (category, count) in counts {
            println!("  {}: {}", category, count);
        }
        println!();
    }

    println!("Field Coverage:");
    println!(
        "  Title: {:.1}% ({} missing)",
        stats.title_coverage(),
        stats.missing_title
    );
    println!(
        "  Timestamp: {:.1}% ({} missing)",
        stats.timestamp_coverage(),
        stats.missing_timestamp
    );
    println!(
        "  Author: {:.1}% ({} missing)",
        stats.author_coverage(),
        stats.missing_author
    );
}

/// Prints the counters of a finished run
pub fn print_run_report(report: &CrawlReport, articles: usize) {
    println!("=== Crawl Summary ===\n");
    println!("  Listing pages fetched: {}", report.listing_pages);
    println!("  Article links discovered: {}", report.links_discovered);
    println!("  Articles scraped: {}", articles);
    println!("  Article fetches failed: {}", report.articles_failed);
    if report.articles_skipped > 0 {
        println!("  Already visited: {}", report.articles_skipped);
    }
    if report.robots_denied > 0 {
        println!("  Refused by robots.txt: {}", report.robots_denied);
    }
}

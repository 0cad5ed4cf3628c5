use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one crawler instance
#[derive(Debug, Default)]
pub struct CrawlCounters {
    listing_pages: AtomicUsize,
    links_discovered: AtomicUsize,
    articles_scraped: AtomicUsize,
    articles_failed: AtomicUsize,
    articles_skipped: AtomicUsize,
    robots_denied: AtomicUsize,
}

impl CrawlCounters {
    pub fn record_listing_page(&self) {
        self.listing_pages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_links(&self, count: usize) {
        self.links_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_scraped(&self) {
        self.articles_scraped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.articles_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.articles_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_robots_denied(&self) {
        self.robots_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters
    pub fn snapshot(&self) -> CrawlReport {
        CrawlReport {
            listing_pages: self.listing_pages.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            articles_scraped: self.articles_scraped.load(Ordering::Relaxed),
            articles_failed: self.articles_failed.load(Ordering::Relaxed),
            articles_skipped: self.articles_skipped.load(Ordering::Relaxed),
            robots_denied: self.robots_denied.load(Ordering::Relaxed),
        }
    }
}

/// What a crawler has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Listing pages fetched successfully
    pub listing_pages: usize,
    /// Article links handed downstream by discovery
    pub links_discovered: usize,
    pub articles_scraped: usize,
    /// Article fetches that failed
    pub articles_failed: usize,
    /// Article URLs skipped because they were already visited
    pub articles_skipped: usize,
    /// Listing or article URLs refused by robots.txt
    pub robots_denied: usize,
}

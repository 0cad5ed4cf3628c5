//! Listing page walk
//!
//! Pages are fetched strictly in order. The walk ends at the first of:
//! - `max_pages` pages processed
//! - a page that fails to fetch or is refused by robots.txt
//! - the crawl being cancelled
//! - a page contributing no link that was not already collected
//! - the candidate set reaching its cap
//! - a page without a "next page" affordance

use crate::crawler::coordinator::Crawler;
use crate::crawler::fetcher::FetchError;
use crate::crawler::parser::parse_listing;
use crate::state::{InsertOutcome, LinkCandidateSet, PaginationCursor};

impl Crawler {
    /// Collects article links from a category's listing pages
    ///
    /// Fetch failures never propagate: whatever was collected before the
    /// failing page is returned. At most `max_pages` listing fetches are
    /// made, plus one robots.txt fetch on the first call when robots.txt is
    /// respected and the category is on the base origin.
    pub async fn discover_links(&self, category_url: &str, max_pages: u32) -> Vec<String> {
        let mut candidates = LinkCandidateSet::new();
        let mut cursor = PaginationCursor::new(category_url);

        while cursor.page() <= max_pages {
            let page_url = cursor.page_url();
            tracing::info!("Scraping page {}", cursor.page());

            if !self.robots_allow(&page_url).await {
                break;
            }

            let page = match self.fetch_page(&page_url).await {
                Ok(page) => page,
                Err(FetchError::Cancelled { .. }) => {
                    tracing::info!("Crawl cancelled before page {}", cursor.page());
                    break;
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch listing page {}: {}", page_url, e);
                    break;
                }
            };
            self.counters.record_listing_page();

            let listing = parse_listing(&page.body, &self.selectors, &self.base_url);
            let mut added = 0;
            for link in listing.links {
                if candidates.insert(link) == InsertOutcome::Added {
                    added += 1;
                }
            }
            tracing::debug!(
                "Page {} added {} links ({} total)",
                cursor.page(),
                added,
                candidates.len()
            );

            if added == 0 {
                tracing::info!("No new article links on page {}, stopping", cursor.page());
                break;
            }
            if candidates.is_full() {
                tracing::info!("Collected {} links, stopping", candidates.len());
                break;
            }
            if !listing.has_next_page {
                break;
            }

            cursor.advance();
        }

        tracing::info!("Found {} article links", candidates.len());
        self.counters.record_links(candidates.len());
        candidates.into_vec()
    }
}

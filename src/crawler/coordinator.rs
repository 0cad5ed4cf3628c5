//! Crawler coordinator - category orchestration logic
//!
//! This module holds the [`Crawler`] instance that owns all per-run state:
//! - the document fetcher and the shared rate limiter
//! - the visited set guarding article fetches
//! - the compiled selector table and base origin
//! - the robots.txt policy, loaded on first use
//!
//! Link discovery and the article pipeline are implemented on the same type
//! in their own modules.

use crate::config::Config;
use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher, HttpFetcher};
use crate::crawler::report::{CrawlCounters, CrawlReport};
use crate::crawler::scheduler::RateLimiter;
use crate::extract::{ArticleRecord, CompiledSelectors};
use crate::robots::{product_token, robots_url, ParsedRobots};
use crate::state::VisitedSet;
use crate::url::{category_from_listing_url, parse_base_url};
use crate::NewsprintError;
use futures::future;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::OnceCell;
use url::Url;

/// One crawl session against a single site
pub struct Crawler {
    pub(crate) fetcher: Arc<dyn Fetcher>,
    pub(crate) limiter: RateLimiter,
    pub(crate) visited: VisitedSet,
    pub(crate) selectors: CompiledSelectors,
    pub(crate) base_url: Url,
    pub(crate) counters: CrawlCounters,
    respect_robots: bool,
    robots_agent: String,
    robots: OnceCell<ParsedRobots>,
    max_concurrent: usize,
}

impl Crawler {
    /// Creates a crawler that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(NewsprintError)` - The HTTP client, base URL or selectors are invalid
    pub fn new(config: &Config) -> Result<Self, NewsprintError> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a crawler that reads documents from the given fetcher
    pub fn with_fetcher(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self, NewsprintError> {
        let base_url = parse_base_url(&config.crawler.base_url)?;
        let selectors = CompiledSelectors::compile(&config.selectors)?;

        Ok(Self {
            fetcher,
            limiter: RateLimiter::from_config(&config.crawler),
            visited: VisitedSet::new(),
            selectors,
            base_url,
            counters: CrawlCounters::default(),
            respect_robots: config.crawler.respect_robots_txt,
            robots_agent: product_token(&config.user_agent.user_agent).to_string(),
            robots: OnceCell::new(),
            max_concurrent: config.crawler.max_concurrent_fetches.max(1) as usize,
        })
    }

    /// URLs this crawler has already processed
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Origin that relative links resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Counters accumulated since the crawler was created
    pub fn report(&self) -> CrawlReport {
        self.counters.snapshot()
    }

    /// Stops the crawl: fetches not yet started fail with
    /// [`FetchError::Cancelled`], so discovery and the article batch wind
    /// down with whatever was already collected
    pub fn cancel(&self) {
        tracing::info!("Cancelling crawl");
        self.limiter.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.limiter.is_closed()
    }

    /// Scrapes one category
    ///
    /// The category label is the last path segment of `category_url` and is
    /// stamped on every record of the batch. Discovered links are truncated
    /// to `max_articles` and fetched with bounded concurrency; the result
    /// keeps link order and omits articles that failed or were already
    /// visited.
    ///
    /// # Arguments
    ///
    /// * `category_url` - The first listing page of the category
    /// * `max_pages` - Maximum listing pages to walk
    /// * `max_articles` - Maximum articles to fetch
    ///
    /// # Example
    ///
    /// ```no_run
    /// use newsprint::{Config, Crawler};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let crawler = Crawler::new(&Config::default())?;
    /// let articles = crawler
    ///     .scrape_category("https://www.bbc.com/innovation", 2, 4)
    ///     .await;
    /// println!("Scraped {} articles", articles.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape_category(
        &self,
        category_url: &str,
        max_pages: u32,
        max_articles: usize,
    ) -> Vec<ArticleRecord> {
        let category = category_from_listing_url(category_url);
        tracing::info!(
            "Scraping category '{}' from {}",
            category.as_deref().unwrap_or("-"),
            category_url
        );

        let links = self.discover_links(category_url, max_pages).await;
        let selected: Vec<String> = links.into_iter().take(max_articles).collect();
        tracing::info!("Processing {} article links", selected.len());

        let category = category.as_deref();
        let articles: Vec<ArticleRecord> = stream::iter(selected)
            .map(|link| async move {
                tracing::info!("Processing: {}", link);
                self.fetch_article(&link, category).await
            })
            .buffered(self.max_concurrent)
            .filter_map(future::ready)
            .collect()
            .await;

        let report = self.report();
        tracing::info!(
            "Category done: {} articles, {} listing pages, {} failed, {} skipped",
            articles.len(),
            report.listing_pages,
            report.articles_failed,
            report.articles_skipped
        );

        articles
    }

    /// Fetches a URL through the rate limiter
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let Some(_permit) = self.limiter.acquire().await else {
            return Err(FetchError::Cancelled {
                url: url.to_string(),
            });
        };

        tracing::debug!("Fetching {}", url);
        self.fetcher.fetch(url).await
    }

    /// Checks a URL against robots.txt of the base origin
    ///
    /// URLs on other origins are not covered by that file and are allowed.
    pub(crate) async fn robots_allow(&self, url: &str) -> bool {
        if !self.respect_robots || !self.is_same_origin(url) {
            return true;
        }

        let allowed = self.robots().await.is_allowed(url, &self.robots_agent);
        if !allowed {
            tracing::info!("URL {} disallowed by robots.txt", url);
            self.counters.record_robots_denied();
        }
        allowed
    }

    fn is_same_origin(&self, url: &str) -> bool {
        Url::parse(url)
            .map(|parsed| parsed.origin() == self.base_url.origin())
            .unwrap_or(false)
    }

    /// Loads robots.txt once; a missing or failing file allows everything
    async fn robots(&self) -> &ParsedRobots {
        self.robots
            .get_or_init(|| async {
                let Some(url) = robots_url(&self.base_url) else {
                    return ParsedRobots::allow_all();
                };

                match self.fetch_page(&url).await {
                    Ok(page) => {
                        tracing::debug!("Loaded robots.txt from {}", url);
                        ParsedRobots::from_content(&page.body)
                    }
                    Err(e) => {
                        tracing::debug!("No usable robots.txt ({}), allowing all", e);
                        ParsedRobots::allow_all()
                    }
                }
            })
            .await
    }
}

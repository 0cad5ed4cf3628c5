//! In-memory fetcher and fixtures for crawler unit tests

use crate::config::Config;
use crate::crawler::fetcher::{FetchError, FetchedPage, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const ARTICLE_HTML: &str = r#"
    <html><body>
      <h1 class="sc-f98b1ad2-0 dfvxux">Test headline</h1>
      <time class="sc-801dd632-2 IvNnh" datetime="2025-01-02T03:04:05.000Z">2 January</time>
      <div class="ssrcss-68pt20-Text-TextContributorName">Jane Reporter</div>
      <img srcset="/img/small.jpg 240w, /img/large.jpg 976w">
      <div data-component="text-block"><p>First paragraph.</p></div>
      <div data-component="text-block"><p>Second paragraph.</p></div>
      <div class="ssrcss-1sh5v2i-TagListWrapper"><ul><li>Science</li><li>Space</li></ul></div>
    </body></html>
"#;

/// Serves fixed documents by URL and counts every request
///
/// URLs without a document fail with a 404 status.
#[derive(Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<HashMap<String, usize>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                final_url: url.to_string(),
                status_code: 200,
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

/// Config against https://example.com with no delay and robots.txt ignored
pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.base_url = "https://example.com".to_string();
    config.crawler.category_url = Some("https://example.com/news/tech".to_string());
    config.crawler.rate_limit_delay = 0.0;
    config.crawler.respect_robots_txt = false;
    config
}

/// Builds a listing page with marked anchors and an optional next link
pub(crate) fn listing_page(hrefs: &[&str], has_next: bool) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a data-testid="internal-link" href="{}">story</a>"#, href))
        .collect();
    let next = if has_next {
        r#"<a aria-label="Next" href="?page=next">Next</a>"#
    } else {
        ""
    };
    format!("<html><body>{}<nav>{}</nav></body></html>", anchors, next)
}

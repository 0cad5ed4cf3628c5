use serde::{Deserialize, Serialize};

/// Default origin that relative article and image links resolve against
pub const DEFAULT_BASE_URL: &str = "https://www.bbc.com";

/// Main configuration structure for Newsprint
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing page to start from (required before a crawl can run)
    #[serde(rename = "category-url")]
    pub category_url: Option<String>,

    /// Maximum number of listing pages to walk
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of articles to fetch from the discovered links
    #[serde(rename = "max-articles")]
    pub max_articles: u32,

    /// Minimum spacing between fetch starts, in seconds
    #[serde(rename = "rate-limit-delay")]
    pub rate_limit_delay: f64,

    /// Maximum number of fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Absolute origin used to resolve relative links
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Whether robots.txt on the base origin is honoured
    #[serde(rename = "respect-robots-txt")]
    pub respect_robots_txt: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            category_url: None,
            max_pages: 3,
            max_articles: 20,
            rate_limit_delay: 0.5,
            max_concurrent_fetches: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            respect_robots_txt: true,
        }
    }
}

/// Request header configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Value of the Accept-Language header
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON file the scraped articles are written to
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Optional SQLite archive that accumulates articles across runs
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "articles.json".to_string(),
            database_path: None,
        }
    }
}

/// How a logical field is located in a parsed document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SelectorStrategy {
    /// A CSS selector, e.g. `{ css = "div.byline" }`
    Css { css: String },

    /// A tag name plus a regex tested against each class of the element,
    /// e.g. `{ tag = "time", class-pattern = "sc-801dd632-2|IvNnh" }`
    TagClass {
        tag: String,
        #[serde(rename = "class-pattern")]
        class_pattern: String,
    },
}

impl SelectorStrategy {
    pub fn css(selector: &str) -> Self {
        Self::Css {
            css: selector.to_string(),
        }
    }

    pub fn tag_class(tag: &str, class_pattern: &str) -> Self {
        Self::TagClass {
            tag: tag.to_string(),
            class_pattern: class_pattern.to_string(),
        }
    }
}

/// Selector table mapping each extracted field to its marker
///
/// The class names below are generated by the target site's build and go
/// stale when its markup changes; a stale marker shows up as a field that is
/// always absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors on listing pages that may point at articles
    pub link: SelectorStrategy,

    /// "Next page" affordance on listing pages
    #[serde(rename = "next-page")]
    pub next_page: SelectorStrategy,

    pub title: SelectorStrategy,
    pub timestamp: SelectorStrategy,
    pub author: SelectorStrategy,

    /// Container holding the tag list
    pub tags: SelectorStrategy,

    /// Tag entries, searched inside the `tags` container
    #[serde(rename = "tag-item")]
    pub tag_item: SelectorStrategy,

    /// Body text blocks
    pub content: SelectorStrategy,

    /// Images carrying a responsive source-set
    pub images: SelectorStrategy,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            link: SelectorStrategy::css(r#"a[data-testid="internal-link"]"#),
            next_page: SelectorStrategy::css(r#"a[aria-label="Next"]"#),
            title: SelectorStrategy::css("h1.sc-f98b1ad2-0.dfvxux"),
            timestamp: SelectorStrategy::tag_class("time", "sc-801dd632-2|IvNnh"),
            author: SelectorStrategy::css("div.ssrcss-68pt20-Text-TextContributorName"),
            tags: SelectorStrategy::css("div.ssrcss-1sh5v2i-TagListWrapper"),
            tag_item: SelectorStrategy::css("li"),
            content: SelectorStrategy::css(r#"div[data-component="text-block"]"#),
            images: SelectorStrategy::css("img[srcset]"),
        }
    }
}

impl SelectorConfig {
    /// Returns every (field name, strategy) pair, for validation and display
    pub fn entries(&self) -> [(&'static str, &SelectorStrategy); 9] {
        [
            ("link", &self.link),
            ("next-page", &self.next_page),
            ("title", &self.title),
            ("timestamp", &self.timestamp),
            ("author", &self.author),
            ("tags", &self.tags),
            ("tag-item", &self.tag_item),
            ("content", &self.content),
            ("images", &self.images),
        ]
    }
}

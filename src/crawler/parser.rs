//! Listing page parser
//!
//! This module extracts from one category listing page:
//! - article links accepted by the article link predicate
//! - whether a "next page" affordance is present

use crate::extract::CompiledSelectors;
use crate::url::accept_article_link;
use scraper::Html;
use url::Url;

/// What a listing page offers for pagination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Accepted article links, absolute, in document order (may repeat)
    pub links: Vec<String>,

    /// Whether the page links to a next page
    pub has_next_page: bool,
}

/// Parses a listing page
///
/// Anchors matching the link marker are kept only when their `href` is an
/// article path; anchors without an `href` are ignored.
///
/// # Example
///
/// ```
/// use newsprint::config::SelectorConfig;
/// use newsprint::crawler::parse_listing;
/// use newsprint::extract::CompiledSelectors;
/// use url::Url;
///
/// let selectors = CompiledSelectors::compile(&SelectorConfig::default()).unwrap();
/// let base = Url::parse("https://www.bbc.com").unwrap();
/// let html = r#"<a data-testid="internal-link" href="/news/articles/c1">One</a>"#;
///
/// let listing = parse_listing(html, &selectors, &base);
/// assert_eq!(listing.links, vec!["https://www.bbc.com/news/articles/c1".to_string()]);
/// assert!(!listing.has_next_page);
/// ```
pub fn parse_listing(html: &str, selectors: &CompiledSelectors, base: &Url) -> ListingPage {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let links = selectors
        .link
        .all(root)
        .into_iter()
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| accept_article_link(base, href))
        .collect();

    let has_next_page = selectors.next_page.first(root).is_some();

    ListingPage {
        links,
        has_next_page,
    }
}

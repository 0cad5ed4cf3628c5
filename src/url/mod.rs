//! URL handling module for Newsprint
//!
//! This module provides base-origin resolution, the article link predicate,
//! and the path-segment heuristics used to derive category labels.

mod matcher;
mod normalize;
mod segments;

// Re-export main functions
pub use matcher::is_article_href;
pub use normalize::{parse_base_url, resolve_href};
pub use segments::{category_from_article_url, category_from_listing_url, path_segments};

use ::url::Url;

/// Accepts a listing-page href and resolves it to an absolute article URL
///
/// Combines [`is_article_href`] with [`resolve_href`]: the predicate is
/// applied to the href exactly as it appears in the page, before resolution.
///
/// # Examples
///
/// ```
/// use newsprint::url::{accept_article_link, parse_base_url};
///
/// let base = parse_base_url("https://www.bbc.com").unwrap();
/// assert_eq!(
///     accept_article_link(&base, "/news/articles/c5y8").as_deref(),
///     Some("https://www.bbc.com/news/articles/c5y8")
/// );
/// assert_eq!(accept_article_link(&base, "/news/live/c5y8"), None);
/// ```
pub fn accept_article_link(base: &Url, href: &str) -> Option<String> {
    if !is_article_href(href) {
        return None;
    }
    resolve_href(base, href)
}

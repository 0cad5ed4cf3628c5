//! Robots.txt handling module
//!
//! This module provides the robots.txt policy a crawler consults before each
//! listing or article fetch. The file is fetched once per crawler, from the
//! base origin, by the crawler itself.

mod parser;

pub use parser::ParsedRobots;

use url::Url;

/// Returns the robots.txt URL of an origin
///
/// # Examples
///
/// ```
/// use newsprint::robots::robots_url;
/// use url::Url;
///
/// let base = Url::parse("https://www.bbc.com/news").unwrap();
/// assert_eq!(robots_url(&base).as_deref(), Some("https://www.bbc.com/robots.txt"));
/// ```
pub fn robots_url(base: &Url) -> Option<String> {
    base.join("/robots.txt").ok().map(|url| url.to_string())
}

/// Reduces a User-Agent header to the product token robots.txt groups use
///
/// # Examples
///
/// ```
/// use newsprint::robots::product_token;
///
/// assert_eq!(product_token("Mozilla/5.0 (Windows NT 10.0)"), "Mozilla");
/// assert_eq!(product_token("NewsBot"), "NewsBot");
/// ```
pub fn product_token(user_agent: &str) -> &str {
    user_agent
        .split(|c: char| c == '/' || c.is_whitespace())
        .find(|token| !token.is_empty())
        .unwrap_or(user_agent)
}

//! Robots.txt parser implementation
//!
//! This module provides functionality for checking URLs against robots.txt
//! content using the robotstxt crate.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's matcher, providing a
/// simplified interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
    /// Whether every URL is allowed regardless of content
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is used when robots.txt is disabled, missing, or cannot be fetched.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns whether this policy allows every URL unconditionally
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Checks if a URL is allowed for the given user agent token
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The product token to match groups against (e.g. "Mozilla")
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all() {
        let robots = ParsedRobots::allow_all();
        assert!(robots.is_allow_all());
        assert!(robots.is_allowed("https://www.bbc.com/anything", "Mozilla"));
    }

    #[test]
    fn test_empty_content_allows() {
        let robots = ParsedRobots::from_content("   \n");
        assert!(robots.is_allowed("https://www.bbc.com/news", "Mozilla"));
    }

    #[test]
    fn test_disallow_for_everyone() {
        let robots = ParsedRobots::from_content("User-agent: *\nDisallow: /news/live/\n");
        assert!(!robots.is_allowed("https://www.bbc.com/news/live/abc", "Mozilla"));
        assert!(robots.is_allowed("https://www.bbc.com/news/articles/abc", "Mozilla"));
    }

    #[test]
    fn test_agent_specific_group() {
        let robots = ParsedRobots::from_content(
            "User-agent: Mozilla\nDisallow: /news/\n\nUser-agent: *\nAllow: /\n",
        );
        assert!(!robots.is_allowed("https://www.bbc.com/news/articles/a", "Mozilla"));
        assert!(robots.is_allowed("https://www.bbc.com/news/articles/a", "OtherBot"));
    }
}

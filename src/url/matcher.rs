use regex::Regex;
use std::sync::OnceLock;

/// Path shape of a standalone article: `/news/articles/<lowercase id>`
const ARTICLE_PATH_PATTERN: &str = r"^/news/articles/[a-z0-9]+$";

fn article_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ARTICLE_PATH_PATTERN).expect("article path pattern is valid"))
}

/// Checks if a listing-page href points at a standalone article
///
/// An href is accepted only when it is exactly `/news/articles/<id>` with a
/// lowercase alphanumeric id and no trailing segments, and it does not
/// contain `live` in any letter case. Live-coverage pages use a different
/// document shape and are never scraped.
///
/// # Examples
///
/// ```
/// use newsprint::url::is_article_href;
///
/// assert!(is_article_href("/news/articles/c0k4j5n9z1xo"));
/// assert!(!is_article_href("/news/articles/c0k4j5n9z1xo/comments"));
/// assert!(!is_article_href("/news/live/c0k4j5n9z1xo"));
/// assert!(!is_article_href("/news/articles/deliveryc9"));
/// ```
pub fn is_article_href(href: &str) -> bool {
    article_path_regex().is_match(href) && !href.to_lowercase().contains("live")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_article_paths() {
        assert!(is_article_href("/news/articles/cx2ee9y0l4yo"));
        assert!(is_article_href("/news/articles/123"));
    }

    #[test]
    fn test_rejects_trailing_segments_and_slashes() {
        assert!(!is_article_href("/news/articles/cx2ee9y0l4yo/"));
        assert!(!is_article_href("/news/articles/cx2ee9y0l4yo/photos"));
        assert!(!is_article_href("/news/articles/"));
    }

    #[test]
    fn test_rejects_uppercase_and_punctuation_ids() {
        assert!(!is_article_href("/news/articles/CX2EE9Y0L4YO"));
        assert!(!is_article_href("/news/articles/cx2-ee9"));
        assert!(!is_article_href("/news/articles/cx2?at_medium=RSS"));
    }

    #[test]
    fn test_rejects_absolute_and_other_sections() {
        assert!(!is_article_href("https://www.bbc.com/news/articles/cx2ee9y0l4yo"));
        assert!(!is_article_href("/sport/articles/cx2ee9y0l4yo"));
        assert!(!is_article_href("/news/technology-12345678"));
    }

    #[test]
    fn test_rejects_live_in_any_case() {
        assert!(!is_article_href("/news/articles/liveabc"));
        assert!(!is_article_href("/news/articles/abclive"));
        assert!(!is_article_href("/news/live/abc"));
        assert!(!is_article_href("/news/LIVE/abc"));
    }
}

use url::Url;

/// Returns the non-empty path segments of a URL
///
/// Unparsable input yields no segments.
pub fn path_segments(url: &str) -> Vec<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed.path_segments().map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
        })
        .unwrap_or_default()
}

/// Derives the category label of a listing page from its last path segment
///
/// # Examples
///
/// ```
/// use newsprint::url::category_from_listing_url;
///
/// assert_eq!(
///     category_from_listing_url("https://www.bbc.com/news/technology").as_deref(),
///     Some("technology")
/// );
/// assert_eq!(category_from_listing_url("https://www.bbc.com/"), None);
/// ```
pub fn category_from_listing_url(category_url: &str) -> Option<String> {
    path_segments(category_url).pop()
}

/// Derives a category from an article URL's third-from-last path segment
///
/// This positional heuristic assumes the `/<category>/<kind>/<id>` depth;
/// URLs of another shape silently produce a wrong segment, and URLs with
/// fewer than three segments produce None.
///
/// # Examples
///
/// ```
/// use newsprint::url::category_from_article_url;
///
/// assert_eq!(
///     category_from_article_url("https://www.bbc.com/news/articles/c1").as_deref(),
///     Some("news")
/// );
/// assert_eq!(category_from_article_url("https://www.bbc.com/c1"), None);
/// ```
pub fn category_from_article_url(article_url: &str) -> Option<String> {
    let segments = path_segments(article_url);
    segments
        .len()
        .checked_sub(3)
        .map(|index| segments[index].clone())
}

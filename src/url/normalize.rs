use crate::UrlError;
use url::Url;

/// Parses the configured base origin
///
/// The base must be an absolute http(s) URL with a host; every article and
/// image link is resolved against it.
///
/// # Examples
///
/// ```
/// use newsprint::url::parse_base_url;
///
/// let base = parse_base_url("https://www.bbc.com").unwrap();
/// assert_eq!(base.as_str(), "https://www.bbc.com/");
/// assert!(parse_base_url("/news").is_err());
/// ```
pub fn parse_base_url(base: &str) -> Result<Url, UrlError> {
    let url = Url::parse(base).map_err(|e| UrlError::Parse(format!("{}: {}", base, e)))?;

    if (url.scheme() != "http" && url.scheme() != "https") || url.host_str().is_none() {
        return Err(UrlError::NotAbsolute(base.to_string()));
    }

    Ok(url)
}

/// Resolves an href against the base origin
///
/// Returns None when the href is empty, is a non-navigational scheme
/// (`javascript:`, `mailto:`, `tel:`, `data:`), or does not resolve to an
/// http(s) URL.
///
/// # Examples
///
/// ```
/// use newsprint::url::{parse_base_url, resolve_href};
///
/// let base = parse_base_url("https://www.bbc.com").unwrap();
/// assert_eq!(
///     resolve_href(&base, "/news/articles/abc123").as_deref(),
///     Some("https://www.bbc.com/news/articles/abc123")
/// );
/// assert_eq!(
///     resolve_href(&base, "//ichef.bbci.co.uk/a.jpg").as_deref(),
///     Some("https://ichef.bbci.co.uk/a.jpg")
/// );
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}

//! Article extraction module
//!
//! This module turns one fetched article page into an [`ArticleRecord`]:
//! - compiled selector table (`selectors`)
//! - per-field extraction rules (`rules`)
//! - responsive image source-set parsing (`srcset`)

mod record;
pub mod rules;
mod selectors;
mod srcset;

pub use record::ArticleRecord;
pub use rules::Extracted;
pub use selectors::{CompiledSelectors, FieldMatcher};
pub use srcset::{parse_srcset, widest_candidate, SrcsetCandidate};

use chrono::Utc;
use scraper::Html;
use url::Url;

/// Extracts a record from an article page
///
/// Every rule runs independently; a field whose marker is missing is left
/// empty instead of failing the record. `category` is the caller's
/// authoritative category, if any.
///
/// # Example
///
/// ```
/// use newsprint::config::SelectorConfig;
/// use newsprint::extract::{extract_article, CompiledSelectors};
/// use url::Url;
///
/// let selectors = CompiledSelectors::compile(&SelectorConfig::default()).unwrap();
/// let base = Url::parse("https://www.bbc.com").unwrap();
/// let record = extract_article(
///     "<html><body><p>nothing marked</p></body></html>",
///     "https://www.bbc.com/news/articles/c1",
///     Some("innovation"),
///     &selectors,
///     &base,
/// );
/// assert_eq!(record.title, None);
/// assert_eq!(record.category.as_deref(), Some("innovation"));
/// assert!(record.tags.is_empty());
/// ```
pub fn extract_article(
    html: &str,
    url: &str,
    category: Option<&str>,
    selectors: &CompiledSelectors,
    base: &Url,
) -> ArticleRecord {
    let document = Html::parse_document(html);

    let title = rules::extract_title(&document, selectors);
    let timestamp = rules::extract_timestamp(&document, selectors);
    let author = rules::extract_author(&document, selectors);

    if !title.is_found() {
        tracing::debug!("No title found on {}", url);
    }
    if !timestamp.is_found() {
        tracing::debug!("No timestamp found on {}", url);
    }

    ArticleRecord {
        url: url.to_string(),
        title: title.into_option(),
        timestamp: timestamp.into_option(),
        author: author.into_option(),
        category: rules::resolve_category(category, url),
        tags: rules::extract_tags(&document, selectors),
        content: rules::extract_content(&document, selectors),
        images: rules::extract_images(&document, selectors, base),
        scraped_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;

    const ARTICLE: &str = r#"
        <html><head><title>ignored</title></head><body>
          <h1 class="sc-f98b1ad2-0 dfvxux">Wind farms go offshore</h1>
          <time class="sc-801dd632-2" datetime="2025-04-10T06:30:00.000Z">10 April</time>
          <div class="ssrcss-68pt20-Text-TextContributorName">Sam Reporter</div>
          <figure><img srcset="/i/320.jpg 320w, /i/1024.jpg 1024w, /i/raw.jpg"></figure>
          <div data-component="text-block"><p>Turbines are getting bigger.</p></div>
          <div data-component="text-block"><p>Ports are getting busier. Çà va.</p></div>
          <div class="ssrcss-1sh5v2i-TagListWrapper"><ul><li>Energy</li><li>Climate</li></ul></div>
        </body></html>
    "#;

    #[test]
    fn test_extract_full_article() {
        let selectors = CompiledSelectors::compile(&SelectorConfig::default()).unwrap();
        let base = Url::parse("https://www.bbc.com").unwrap();
        let before = Utc::now();

        let record = extract_article(
            ARTICLE,
            "https://www.bbc.com/news/articles/c2x",
            None,
            &selectors,
            &base,
        );

        assert_eq!(record.url, "https://www.bbc.com/news/articles/c2x");
        assert_eq!(record.title.as_deref(), Some("Wind farms go offshore"));
        assert_eq!(record.timestamp.as_deref(), Some("2025-04-10T06:30:00.000Z"));
        assert_eq!(record.author.as_deref(), Some("Sam Reporter"));
        assert_eq!(record.category.as_deref(), Some("news"));
        assert_eq!(record.tags, vec!["Energy".to_string(), "Climate".to_string()]);
        assert_eq!(
            record.content,
            "Turbines are getting bigger.\n\nPorts are getting busier. Çà va."
        );
        assert_eq!(record.images, vec!["https://www.bbc.com/i/1024.jpg".to_string()]);
        assert!(record.scraped_at >= before);
    }

    #[test]
    fn test_custom_selector_table() {
        let mut config = SelectorConfig::default();
        config.title = crate::config::SelectorStrategy::css("head > title");
        let selectors = CompiledSelectors::compile(&config).unwrap();
        let base = Url::parse("https://www.bbc.com").unwrap();

        let record = extract_article(ARTICLE, "https://www.bbc.com/x/y/z", None, &selectors, &base);
        assert_eq!(record.title.as_deref(), Some("ignored"));
    }
}

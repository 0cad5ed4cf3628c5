//! Field extraction rules
//!
//! Every rule looks at one parsed article and reports what it found. A
//! missing marker is [`Extracted::Absent`]; a marker whose content cannot be
//! used is [`Extracted::Malformed`]. Neither stops the other rules.

use crate::extract::selectors::CompiledSelectors;
use crate::extract::srcset::widest_candidate;
use crate::url::{category_from_article_url, resolve_href};
use scraper::{ElementRef, Html};
use url::Url;

/// Outcome of a single extraction rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// The field was found
    Found(T),
    /// The marker is not on the page
    Absent,
    /// The marker is present but its content is unusable
    Malformed(String),
}

impl<T> Extracted<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent | Self::Malformed(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl Extracted<String> {
    fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::Found(text),
            _ => Self::Absent,
        }
    }
}

/// Text of an element with runs of whitespace collapsed to one space
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title heading; an empty heading counts as absent
pub fn extract_title(document: &Html, selectors: &CompiledSelectors) -> Extracted<String> {
    Extracted::from_text(selectors.title.first(document.root_element()).map(element_text))
}

/// `datetime` attribute of the first matching time element
pub fn extract_timestamp(document: &Html, selectors: &CompiledSelectors) -> Extracted<String> {
    let datetime = selectors
        .timestamp
        .first(document.root_element())
        .and_then(|element| element.value().attr("datetime"))
        .map(|value| value.trim().to_string());
    Extracted::from_text(datetime)
}

/// Contributor name
pub fn extract_author(document: &Html, selectors: &CompiledSelectors) -> Extracted<String> {
    Extracted::from_text(selectors.author.first(document.root_element()).map(element_text))
}

/// Category of an article
///
/// A non-empty category supplied by the caller always wins. Otherwise the
/// third-from-last path segment of the article URL is used.
pub fn resolve_category(explicit: Option<&str>, article_url: &str) -> Option<String> {
    match explicit {
        Some(category) if !category.is_empty() => Some(category.to_string()),
        _ => category_from_article_url(article_url),
    }
}

/// Text of each tag entry inside the first tags container
pub fn extract_tags(document: &Html, selectors: &CompiledSelectors) -> Vec<String> {
    selectors
        .tags
        .first(document.root_element())
        .map(|container| {
            selectors
                .tag_item
                .all(container)
                .into_iter()
                .map(element_text)
                .collect()
        })
        .unwrap_or_default()
}

/// Body text blocks joined by blank lines, in document order
pub fn extract_content(document: &Html, selectors: &CompiledSelectors) -> String {
    selectors
        .content
        .all(document.root_element())
        .into_iter()
        .map(element_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Widest source-set variant of one image, resolved against the base
pub fn extract_image(image: ElementRef<'_>, base: &Url) -> Extracted<String> {
    let Some(srcset) = image.value().attr("srcset") else {
        return Extracted::Absent;
    };

    let Some(widest) = widest_candidate(srcset) else {
        return Extracted::Malformed(format!("no usable entry in srcset '{}'", srcset));
    };

    match resolve_href(base, &widest.url) {
        Some(url) => Extracted::Found(url),
        None => Extracted::Malformed(format!("cannot resolve image url '{}'", widest.url)),
    }
}

/// One absolute URL per image with a usable source-set, in document order
///
/// Images whose source-set cannot be used are skipped.
pub fn extract_images(document: &Html, selectors: &CompiledSelectors, base: &Url) -> Vec<String> {
    selectors
        .images
        .all(document.root_element())
        .into_iter()
        .filter_map(|image| match extract_image(image, base) {
            Extracted::Found(url) => Some(url),
            Extracted::Absent => None,
            Extracted::Malformed(reason) => {
                tracing::debug!("Skipping image: {}", reason);
                None
            }
        })
        .collect()
}

//! Compiled form of the selector table
//!
//! Selectors are compiled once when a crawler is built so that a broken
//! entry is reported as a configuration error instead of a field that is
//! silently never found.

use crate::config::{SelectorConfig, SelectorStrategy};
use crate::ConfigError;
use regex::Regex;
use scraper::{ElementRef, Selector};

/// A compiled [`SelectorStrategy`]
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    /// Elements matching a CSS selector
    Css(Selector),

    /// Elements with the given tag having a class that matches the pattern
    TagClass { tag: Selector, class_pattern: Regex },
}

impl FieldMatcher {
    /// Compiles one selector strategy
    ///
    /// `field` only names the entry in error messages.
    pub fn compile(field: &str, strategy: &SelectorStrategy) -> Result<Self, ConfigError> {
        match strategy {
            SelectorStrategy::Css { css } => Ok(Self::Css(parse_selector(field, css)?)),
            SelectorStrategy::TagClass { tag, class_pattern } => {
                let tag = parse_selector(field, tag)?;
                let class_pattern =
                    Regex::new(class_pattern).map_err(|e| ConfigError::InvalidSelector {
                        field: field.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Self::TagClass { tag, class_pattern })
            }
        }
    }

    /// Returns the first matching descendant of `scope`, in document order
    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        match self {
            Self::Css(selector) => scope.select(selector).next(),
            Self::TagClass { tag, class_pattern } => scope
                .select(tag)
                .find(|element| class_matches(element, class_pattern)),
        }
    }

    /// Returns every matching descendant of `scope`, in document order
    pub fn all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match self {
            Self::Css(selector) => scope.select(selector).collect(),
            Self::TagClass { tag, class_pattern } => scope
                .select(tag)
                .filter(|element| class_matches(element, class_pattern))
                .collect(),
        }
    }
}

/// Tests the pattern against each class and against the whole attribute
fn class_matches(element: &ElementRef<'_>, pattern: &Regex) -> bool {
    let value = element.value();
    value.classes().any(|class| pattern.is_match(class))
        || value.attr("class").is_some_and(|all| pattern.is_match(all))
}

fn parse_selector(field: &str, css: &str) -> Result<Selector, ConfigError> {
    Selector::parse(css).map_err(|e| ConfigError::InvalidSelector {
        field: field.to_string(),
        message: format!("{:?}", e),
    })
}

/// Every field marker, compiled
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub link: FieldMatcher,
    pub next_page: FieldMatcher,
    pub title: FieldMatcher,
    pub timestamp: FieldMatcher,
    pub author: FieldMatcher,
    pub tags: FieldMatcher,
    pub tag_item: FieldMatcher,
    pub content: FieldMatcher,
    pub images: FieldMatcher,
}

impl CompiledSelectors {
    /// Compiles the whole selector table
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            link: FieldMatcher::compile("link", &config.link)?,
            next_page: FieldMatcher::compile("next-page", &config.next_page)?,
            title: FieldMatcher::compile("title", &config.title)?,
            timestamp: FieldMatcher::compile("timestamp", &config.timestamp)?,
            author: FieldMatcher::compile("author", &config.author)?,
            tags: FieldMatcher::compile("tags", &config.tags)?,
            tag_item: FieldMatcher::compile("tag-item", &config.tag_item)?,
            content: FieldMatcher::compile("content", &config.content)?,
            images: FieldMatcher::compile("images", &config.images)?,
        })
    }
}

//! Shared handbook types.
//!
//! Everything here is a plain owned value: the repository and navigation
//! builder hand each caller a fresh copy, and nothing is mutated after
//! construction. All types serialize so `folio nav` can dump them as JSON.

use crate::naming::UNORDERED;
use serde::{Deserialize, Serialize};

/// One question/answer pair from a page's `faq:` front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Per-page attributes extracted from front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    /// File stem; empty for the introduction page.
    pub slug: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Sort key within the category. [`UNORDERED`] when not declared.
    pub order: i64,
    /// `None` means the page is the introduction or is uncategorized.
    pub category: Option<String>,
    /// Sort key for the category itself. [`UNORDERED`] when not declared.
    pub category_order: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faq: Vec<FaqEntry>,
}

impl PageMetadata {
    /// Metadata for a file with no front matter at all.
    pub fn defaults_for(slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: default_title(slug),
            description: String::new(),
            keywords: Vec::new(),
            order: UNORDERED,
            category: None,
            category_order: UNORDERED,
            faq: Vec::new(),
        }
    }

    pub fn is_introduction(&self) -> bool {
        self.slug.is_empty()
    }
}

/// Title fallback: the slug itself, or a fixed label for the introduction.
pub fn default_title(slug: &str) -> String {
    if slug.is_empty() {
        crate::naming::INTRODUCTION_TITLE.to_string()
    } else {
        slug.to_string()
    }
}

/// A heading collected while rendering markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Anchor id emitted on the heading element.
    pub id: String,
    pub text: String,
}

/// A fully resolved handbook page.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub meta: PageMetadata,
    /// Raw markdown body (front matter stripped).
    pub content: String,
    /// Rendered, unsanitized HTML.
    pub content_html: String,
    pub toc: Vec<TocEntry>,
    pub word_count: usize,
}

/// Lightweight projection of [`PageMetadata`] used for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub slug: String,
    pub title: String,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub category_order: i64,
}

impl From<&PageMetadata> for NavItem {
    fn from(meta: &PageMetadata) -> Self {
        Self {
            slug: meta.slug.clone(),
            title: meta.title.clone(),
            order: meta.order,
            category: meta.category.clone(),
            category_order: meta.category_order,
        }
    }
}

/// A named, ordered group of pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub order: i64,
    pub items: Vec<NavItem>,
}

/// Root navigation aggregate: optional introduction plus ordered categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<NavItem>,
    pub categories: Vec<Category>,
}

/// Neighbours of a page in the flattened navigation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrevNext<'a> {
    pub previous: Option<&'a NavItem>,
    pub next: Option<&'a NavItem>,
}

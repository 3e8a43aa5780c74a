//! Handbook navigation assembly.
//!
//! [`build_navigation`] scans the handbook directory once, reading only the
//! front matter of each file, and produces a [`Navigation`]:
//!
//! ```text
//! Navigation
//! ├── introduction: index.md                 (slug "")
//! ├── Category "Fundamentals" (order 1)
//! │   ├── ownership   (order 1)
//! │   └── borrowing   (order 2)
//! └── Category "Frameworks & Libraries" (order 2)
//!     └── serde       (no order → last)
//! ```
//!
//! ## Ordering rules
//!
//! - Files are visited in file-name order.
//! - Items sort by `order`, categories by their `categoryOrder`; both sorts
//!   are stable, so ties keep visiting order.
//! - A category's order comes from the **first** file that names it. Later
//!   files naming the same category with a different `categoryOrder` do not
//!   change it, even when the first file declared none.
//! - Pages that are neither the introduction nor categorized are left out of
//!   navigation. They are still listed, built and reachable by URL.
//!
//! The result is an owned snapshot; every call rescans the directory.
//!
//! ## Prev / next
//!
//! [`Navigation::flatten`] lays the tree out in reading order (introduction,
//! then each category's items) and [`prev_next`] looks a slug up in that
//! list.

use crate::naming::slugify;
use crate::repository::{self, ContentError, ContentRepository};
use crate::types::{Category, NavItem, Navigation, PrevNext};
use std::collections::HashMap;

/// Scan the repository and assemble the navigation tree.
pub fn build_navigation(repo: &ContentRepository) -> Result<Navigation, ContentError> {
    let mut items = Vec::new();
    for file in repo.content_files()? {
        let meta = repository::load_metadata(&file)?;
        items.push(NavItem::from(&meta));
    }
    let navigation = assemble(items);
    tracing::debug!(
        categories = navigation.categories.len(),
        pages = navigation.len(),
        "navigation built"
    );
    Ok(navigation)
}

/// Group navigation items, in visiting order, into a [`Navigation`].
pub fn assemble(items: Vec<NavItem>) -> Navigation {
    let mut introduction = None;
    let mut categories: Vec<Category> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for item in items {
        if item.slug.is_empty() {
            introduction = Some(item);
            continue;
        }
        let Some(name) = item.category.clone() else {
            tracing::debug!(slug = %item.slug, "page has no category, left out of navigation");
            continue;
        };

        let idx = *index_by_name.entry(name.clone()).or_insert_with(|| {
            categories.push(Category {
                slug: slugify(&name),
                name,
                order: item.category_order,
                items: Vec::new(),
            });
            categories.len() - 1
        });
        categories[idx].items.push(item);
    }

    for category in &mut categories {
        category.items.sort_by_key(|item| item.order);
    }
    categories.sort_by_key(|category| category.order);

    Navigation {
        introduction,
        categories,
    }
}

impl Navigation {
    /// Every listed page in reading order: introduction first, then each
    /// category's items.
    pub fn flatten(&self) -> Vec<NavItem> {
        self.introduction
            .iter()
            .chain(self.categories.iter().flat_map(|c| c.items.iter()))
            .cloned()
            .collect()
    }

    /// Number of pages listed in navigation.
    pub fn len(&self) -> usize {
        usize::from(self.introduction.is_some())
            + self.categories.iter().map(|c| c.items.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The category a slug is listed under, if any.
    pub fn category_of(&self, slug: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.items.iter().any(|item| item.slug == slug))
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.introduction.as_ref().is_some_and(|i| i.slug == slug)
            || self.category_of(slug).is_some()
    }
}

/// Neighbours of `slug` in a flattened navigation list.
///
/// An unknown slug has neither neighbour.
pub fn prev_next<'a>(flat: &'a [NavItem], slug: &str) -> PrevNext<'a> {
    let Some(pos) = flat.iter().position(|item| item.slug == slug) else {
        return PrevNext::default();
    };
    PrevNext {
        previous: pos.checked_sub(1).and_then(|p| flat.get(p)),
        next: flat.get(pos + 1),
    }
}

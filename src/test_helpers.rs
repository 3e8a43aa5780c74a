//! Shared test utilities for the folio test suite.
//!
//! Provides fixture setup, page writers, and navigation lookups with
//! assertions that print what *was* found on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let repo = ContentRepository::new(tmp.path().join("handbook"));
//! let nav = build_navigation(&repo).unwrap();
//!
//! assert_nav_shape(&nav, &[
//!     ("Fundamentals", &["ownership", "borrowing", "lifetimes"]),
//!     ("Frameworks & Libraries", &["serde", "tokio"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Category, Navigation};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write a handbook page. An empty `front` writes the body with no front
/// matter block at all.
pub fn write_page(dir: &Path, filename: &str, front: &str, body: &str) {
    std::fs::create_dir_all(dir).unwrap();
    let text = if front.is_empty() {
        body.to_string()
    } else {
        format!("---\n{front}\n---\n{body}")
    };
    std::fs::write(dir.join(filename), text).unwrap();
}

// =========================================================================
// Navigation lookups: panic with a clear message on miss
// =========================================================================

/// All category names in navigation order.
pub fn category_names(nav: &Navigation) -> Vec<&str> {
    nav.categories.iter().map(|c| c.name.as_str()).collect()
}

/// Find a category by name. Panics if not found.
pub fn find_category<'a>(nav: &'a Navigation, name: &str) -> &'a Category {
    nav.categories
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| {
            let names = category_names(nav);
            panic!("category '{name}' not found. Available: {names:?}")
        })
}

/// Item slugs of a category, in order.
pub fn item_slugs(category: &Category) -> Vec<&str> {
    category.items.iter().map(|i| i.slug.as_str()).collect()
}

/// Assert that the categories and their items match an expected shape.
///
/// Each entry is `(category name, item slugs)`. The introduction is not
/// part of the shape.
pub fn assert_nav_shape(nav: &Navigation, expected: &[(&str, &[&str])]) {
    let expected_names: Vec<&str> = expected.iter().map(|(n, _)| *n).collect();
    assert_eq!(category_names(nav), expected_names, "category order mismatch");

    for (name, slugs) in expected {
        let actual = item_slugs(find_category(nav, name));
        assert_eq!(actual, slugs.to_vec(), "items of '{name}' mismatch");
    }
}

//! Slug conventions shared by every stage.
//!
//! Handbook pages live flat in one directory and are addressed by their file
//! stem:
//!
//! - `index.md` → `""` (the introduction, served at the handbook root)
//! - `closures.md` → `"closures"`
//!
//! Categories have no file of their own, so their slug is derived from the
//! display name with [`slugify`]:
//!
//! - `"Frameworks & Libraries"` → `"frameworks-libraries"`
//! - `"  C++ / Rust  "` → `"c-rust"`

use std::path::Path;

/// Sort key for pages and categories that declare no explicit order.
///
/// Larger than any order an author can write, so unordered entries always
/// land after ordered ones.
pub const UNORDERED: i64 = i64::MAX;

/// File stem that maps to the introduction page.
pub const INTRODUCTION_STEM: &str = "index";

/// Title used for the introduction page when its front matter has none.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// Lower-case `name`, collapse every run of non-alphanumeric characters into
/// a single `-`, and trim dashes from both ends.
///
/// Only ASCII letters and digits survive; everything else (including
/// non-ASCII letters) is a separator.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Whether `path` names a handbook content file (`*.md`, not hidden).
pub fn is_content_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
}

/// Derive a page slug from a content file path.
///
/// `index.md` maps to the empty slug; every other file maps to its stem.
pub fn slug_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    if stem == INTRODUCTION_STEM {
        Some(String::new())
    } else {
        Some(stem.into_owned())
    }
}

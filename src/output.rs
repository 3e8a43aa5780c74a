//! CLI output formatting for `folio check` and `folio build`.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every page is its navigation position and title; the markdown file
//! it came from is secondary context on an indented `Source:` line.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Introduction
//!     Welcome to the Rust Handbook
//!         Source: index.md
//! 001 Fundamentals (3 pages)
//!     001 Ownership
//!         Source: ownership.md
//!         Description: Who owns a value, and what happens when it moves.
//!     002 Borrowing
//!         Source: borrowing.md
//! ...
//! Unlisted
//!     scratchpad
//!         Source: scratchpad.md
//!
//! Checked 7 pages, 2 categories
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Handbook → handbook/index.html
//!     handbook/ownership/index.html
//!     ...
//! 404.html
//! sitemap.xml
//! robots.txt
//!
//! Generated 7 handbook pages, 2 categories (1 unlisted) in dist
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::BuildSummary;
use crate::repository::ContentFile;
use crate::types::{Navigation, Page};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional page count.
///
/// ```text
/// 001 Fundamentals (3 pages)
/// 002 Borrowing
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 page)", format_index(index), title),
        Some(n) => format!("{} {} ({} pages)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Indented `Source:` and `Description:` context lines for a page.
fn page_context(depth: usize, file: Option<&ContentFile>, page: Option<&Page>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(name) = file.and_then(|f| f.path.file_name()) {
        lines.push(format!(
            "{}Source: {}",
            indent(depth),
            name.to_string_lossy()
        ));
    }
    if let Some(page) = page.filter(|p| !p.meta.description.is_empty()) {
        lines.push(format!(
            "{}Description: {}",
            indent(depth),
            truncate_desc(&page.meta.description, 60)
        ));
    }
    lines
}

// ============================================================================
// Check output
// ============================================================================

/// Format `check` output: the navigation tree with every loaded page.
///
/// `pages` is every file in the handbook directory; the ones navigation
/// leaves out are listed under `Unlisted`.
pub fn format_check_output(nav: &Navigation, pages: &[(ContentFile, Page)]) -> Vec<String> {
    let lookup = |slug: &str| pages.iter().find(|(f, _)| f.slug == slug);
    let context = |slug: &str, depth: usize| {
        let found = lookup(slug);
        page_context(depth, found.map(|(f, _)| f), found.map(|(_, p)| p))
    };
    let mut lines = Vec::new();

    if let Some(intro) = &nav.introduction {
        lines.push("Introduction".to_string());
        lines.push(format!("{}{}", indent(1), intro.title));
        lines.extend(context(&intro.slug, 2));
    }

    for (i, category) in nav.categories.iter().enumerate() {
        lines.push(entity_header(i + 1, &category.name, Some(category.items.len())));
        for (j, item) in category.items.iter().enumerate() {
            lines.push(format!("{}{}", indent(1), entity_header(j + 1, &item.title, None)));
            lines.extend(context(&item.slug, 2));
        }
    }

    let unlisted: Vec<&(ContentFile, Page)> = pages
        .iter()
        .filter(|(f, _)| !nav.contains(&f.slug))
        .collect();
    if !unlisted.is_empty() {
        lines.push("Unlisted".to_string());
        for (file, page) in unlisted {
            lines.push(format!("{}{}", indent(1), page.meta.title));
            lines.extend(page_context(2, Some(file), None));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Checked {} pages, {} categories",
        pages.len(),
        nav.categories.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(nav: &Navigation, pages: &[(ContentFile, Page)]) {
    for line in format_check_output(nav, pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format `build` output: every written file, then a one-line summary.
pub fn format_build_output(summary: &BuildSummary, handbook_path: &str) -> Vec<String> {
    let handbook_index = format!("{}/index.html", handbook_path.trim_matches('/'));
    let mut lines = Vec::new();

    for file in &summary.files {
        let line = if file == "index.html" {
            "Home \u{2192} index.html".to_string()
        } else if *file == handbook_index {
            format!("Handbook \u{2192} {}", file)
        } else if file.ends_with("/index.html") {
            format!("{}{}", indent(1), file)
        } else {
            file.clone()
        };
        lines.push(line);
    }

    let mut total = format!(
        "Generated {} handbook pages, {} categories",
        summary.pages, summary.categories
    );
    if !summary.unlisted.is_empty() {
        total.push_str(&format!(" ({} unlisted)", summary.unlisted.len()));
    }
    total.push_str(&format!(" in {}", summary.output_dir.display()));

    lines.push(String::new());
    lines.push(total);
    lines
}

/// Print build output to stdout.
pub fn print_build_output(summary: &BuildSummary, handbook_path: &str) {
    for line in format_build_output(summary, handbook_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::build_navigation;
    use crate::repository::ContentRepository;
    use crate::test_helpers::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn entity_header_counts() {
        assert_eq!(entity_header(1, "Fundamentals", Some(3)), "001 Fundamentals (3 pages)");
        assert_eq!(entity_header(2, "Async", Some(1)), "002 Async (1 page)");
        assert_eq!(entity_header(3, "Borrowing", None), "003 Borrowing");
    }

    #[test]
    fn truncate_desc_is_char_safe() {
        assert_eq!(truncate_desc("Short text", 40), "Short text");
        assert_eq!(truncate_desc(&"a".repeat(40), 40), "a".repeat(40));
        assert_eq!(truncate_desc("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_desc("", 40), "");
    }

    #[test]
    fn check_output_for_fixtures() {
        let tmp = setup_fixtures();
        let repo = ContentRepository::new(tmp.path().join("handbook"));
        let nav = build_navigation(&repo).unwrap();
        let pages = repo.load_all().unwrap();

        let lines = format_check_output(&nav, &pages);
        let expected_start = vec![
            "Introduction",
            "    Welcome to the Rust Handbook",
            "        Source: index.md",
            "        Description: Where to start and how this handbook is organized.",
            "001 Fundamentals (3 pages)",
            "    001 Ownership",
            "        Source: ownership.md",
            "        Description: Who owns a value, and what happens when it moves.",
        ];
        assert_eq!(lines[..expected_start.len()].to_vec(), expected_start);
        assert!(lines.contains(&"002 Frameworks & Libraries (2 pages)".to_string()));

        let unlisted = lines.iter().position(|l| l == "Unlisted").unwrap();
        assert_eq!(lines[unlisted + 1], "    scratchpad");
        assert_eq!(lines[unlisted + 2], "        Source: scratchpad.md");
        assert_eq!(lines.last().unwrap(), "Checked 7 pages, 2 categories");
    }

    #[test]
    fn check_output_without_introduction() {
        let nav = Navigation::default();
        let lines = format_check_output(&nav, &[]);
        assert_eq!(lines, vec!["".to_string(), "Checked 0 pages, 0 categories".to_string()]);
    }

    #[test]
    fn build_output_lists_files() {
        let summary = BuildSummary {
            output_dir: PathBuf::from("dist"),
            files: vec![
                "index.html".to_string(),
                "handbook/index.html".to_string(),
                "handbook/ownership/index.html".to_string(),
                "404.html".to_string(),
                "sitemap.xml".to_string(),
            ],
            pages: 2,
            categories: 1,
            unlisted: vec!["scratchpad".to_string()],
        };
        let lines = format_build_output(&summary, "handbook");
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html",
                "Handbook \u{2192} handbook/index.html",
                "    handbook/ownership/index.html",
                "404.html",
                "sitemap.xml",
                "",
                "Generated 2 handbook pages, 1 categories (1 unlisted) in dist",
            ]
        );
    }
}

//! YAML front matter extraction for handbook pages.
//!
//! A page may open with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Ownership
//! description: Who frees what, and when
//! order: 2
//! category: Fundamentals
//! categoryOrder: 1
//! keywords: [rust, memory]
//! ---
//! # Ownership
//! ...
//! ```
//!
//! ## Defaults
//!
//! Every field is optional. Missing values fall back to:
//!
//! | Field | Default |
//! |-------|---------|
//! | `title` | the slug (`"Introduction"` for `index.md`) |
//! | `description` | `""` |
//! | `keywords` | `[]` |
//! | `order`, `categoryOrder` | [`UNORDERED`] (sorts last) |
//! | `category` | none |
//!
//! A file without an opening `---` has no front matter and gets all defaults.
//! An opening fence without a closing one, YAML that does not parse, or a
//! field of the wrong type is an error for that file; there is no partial
//! recovery.

use crate::naming::UNORDERED;
use crate::types::{FaqEntry, PageMetadata, default_title};
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("front matter is not closed (missing `---` line)")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Front matter as written by the author, before defaults are applied.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontMatter {
    title: Option<String>,
    description: Option<String>,
    keywords: Option<Vec<String>>,
    order: Option<i64>,
    category: Option<String>,
    #[serde(rename = "categoryOrder", alias = "category_order")]
    category_order: Option<i64>,
    faq: Option<Vec<FaqEntry>>,
}

impl RawFrontMatter {
    fn into_metadata(self, slug: &str) -> PageMetadata {
        PageMetadata {
            slug: slug.to_string(),
            title: non_blank(self.title).unwrap_or_else(|| default_title(slug)),
            description: self.description.unwrap_or_default(),
            keywords: self
                .keywords
                .unwrap_or_default()
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            order: self.order.unwrap_or(UNORDERED),
            category: non_blank(self.category),
            category_order: self.category_order.unwrap_or(UNORDERED),
            faq: self.faq.unwrap_or_default(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_fence(line: &str, closing: bool) -> bool {
    let line = line.trim_end();
    line == "---" || (closing && line == "...")
}

/// A YAML block holding nothing but blank lines and comments.
fn is_blank_yaml(yaml: &str) -> bool {
    yaml.lines().all(|l| {
        let l = l.trim();
        l.is_empty() || l.starts_with('#')
    })
}

/// Split `text` into its raw YAML block (if any) and the markdown body.
pub fn split(text: &str) -> Result<(Option<&str>, &str), FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((None, text));
    };
    if !is_fence(first, false) {
        return Ok((None, text));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line, true) {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Parse a page's full text into metadata and markdown body.
pub fn parse<'a>(slug: &str, text: &'a str) -> Result<(PageMetadata, &'a str), FrontMatterError> {
    let (yaml, body) = split(text)?;
    let raw = match yaml {
        Some(yaml) if !is_blank_yaml(yaml) => serde_yaml::from_str::<RawFrontMatter>(yaml)?,
        _ => RawFrontMatter::default(),
    };
    Ok((raw.into_metadata(slug), body))
}

/// Read just enough of a page to parse its front matter.
///
/// Stops after the closing fence (or after the first line when there is no
/// front matter), so the markdown body is never read. The returned prefix
/// can be handed to [`parse`]; for an unterminated block the whole input is
/// returned and [`parse`] reports the error.
pub fn read_header<R: BufRead>(mut reader: R) -> io::Result<String> {
    let mut header = String::new();
    let mut line = String::new();

    if reader.read_line(&mut line)? == 0 {
        return Ok(header);
    }
    let opens = is_fence(line.trim_start_matches('\u{feff}'), false);
    header.push_str(&line);
    if !opens {
        return Ok(header);
    }

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(header);
        }
        header.push_str(&line);
        if is_fence(&line, true) {
            return Ok(header);
        }
    }
}

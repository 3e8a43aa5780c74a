//! Markdown to HTML conversion.
//!
//! Rendering uses [pulldown-cmark](https://docs.rs/pulldown-cmark) with
//! tables, footnotes, strikethrough, task lists and `{#id}` heading
//! attributes enabled.
//!
//! ## Trust boundary
//!
//! The output is **not sanitized**. Raw HTML in a page passes straight
//! through and the result is inserted into the page unescaped. Handbook
//! content is written by the site owner and reviewed like code; nothing a
//! visitor supplies ever reaches this renderer. Keep it that way: if
//! untrusted input is ever rendered, it needs a sanitizer in front of it.
//!
//! ## Heading anchors
//!
//! Headings without an explicit `{#id}` get one derived from their text via
//! [`slugify`], de-duplicated with `-1`, `-2`, ... in document order. `##`
//! and `###` headings are collected into the table of contents.
//!
//! Rendering is pure: the same markdown always yields byte-identical HTML.

use crate::naming::slugify;
use crate::types::TocEntry;
use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};
use std::collections::HashSet;

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub word_count: usize,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Render markdown to HTML, returning only the HTML.
pub fn to_html(markdown: &str) -> String {
    render(markdown).html
}

/// Render markdown to HTML, collecting headings and a word count on the way.
pub fn render(markdown: &str) -> Rendered {
    let mut events: Vec<Event> = Parser::new_ext(markdown, options()).collect();
    let mut used_ids = HashSet::new();
    let mut toc = Vec::new();
    let mut word_count = 0;

    // Explicit ids claim their names first so generated ones route around them.
    for event in &events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            used_ids.insert(id.to_string());
        }
    }

    for i in 0..events.len() {
        let (level, explicit_id) = match &events[i] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (*level, id.as_ref().map(|id| id.to_string()))
            }
            Event::Text(text) | Event::Code(text) => {
                word_count += text.split_whitespace().count();
                continue;
            }
            _ => continue,
        };

        let text = heading_text(&events[i + 1..]);
        let anchor = match explicit_id {
            Some(id) => id,
            None => {
                let anchor = unique_anchor(&slugify(&text), &mut used_ids);
                if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                    *id = Some(CowStr::from(anchor.clone()));
                }
                anchor
            }
        };

        let level = match level {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            _ => continue,
        };
        toc.push(TocEntry {
            level,
            id: anchor,
            text,
        });
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    Rendered {
        html: out,
        toc,
        word_count,
    }
}

/// Plain text of the heading whose start event precedes `rest`.
fn heading_text(rest: &[Event]) -> String {
    let mut text = String::new();
    for event in rest {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

fn unique_anchor(base: &str, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() { "section" } else { base };
    let mut candidate = base.to_string();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

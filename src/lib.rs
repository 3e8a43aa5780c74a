//! # Folio
//!
//! A static site generator for a personal portfolio with an embedded
//! technical handbook. A flat directory of markdown files becomes an
//! ordered, categorized handbook; a small key-value service supplies the
//! owner's name, links and consultation offer for the home page.
//!
//! # Architecture: Read, Order, Render
//!
//! ```text
//! content/handbook/*.md ──► repository ──► navigation ──► generate ──► dist/
//!                           (front matter,  (categories,    (maud pages,
//!                            markdown)       prev/next)      seo, sitemap)
//! remote key-value ───────► personal ─────────────────────────┘
//! ```
//!
//! Nothing is cached between calls. The repository re-reads the directory
//! on every request, navigation is rebuilt from scratch, and every value
//! handed out is an owned copy.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`frontmatter`] | Splits the `---` YAML block off a page and parses it into [`types::PageMetadata`] |
//! | [`markdown`] | pulldown-cmark rendering with heading anchors, table of contents and word count |
//! | [`repository`] | Lists slugs and loads pages from the handbook directory |
//! | [`navigation`] | Groups pages into ordered categories; flattening and prev/next |
//! | [`seo`] | Breadcrumbs, JSON-LD and Open Graph tags |
//! | [`sitemap`] | `sitemap.xml` and `robots.txt` |
//! | [`personal`] | Remote personal-info fetch with per-field config fallbacks |
//! | [`generate`] | Writes the static site |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared handbook types (`Page`, `NavItem`, `Category`, `Navigation`) |
//! | [`naming`] | Slug rules and the ordering sentinel |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Ordering Without Prefixes
//!
//! Pages declare `order`, `category` and `categoryOrder` in front matter.
//! Anything left unset sorts last ([`naming::UNORDERED`]). Sorts are stable
//! and files are enumerated by name, so ties always break the same way.
//! The first file to mention a category fixes that category's order.
//!
//! ## Unlisted Pages
//!
//! A page without a category is not in navigation but is still rendered
//! and listed in the sitemap. This is the place for drafts you want to
//! share by URL.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed templates are build errors and all interpolation
//! is auto-escaped. Rendered markdown is the one deliberate exception.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod personal;
pub mod repository;
pub mod seo;
pub mod sitemap;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

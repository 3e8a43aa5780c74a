//! HTML site generation.
//!
//! Final stage of a `folio build`. Reads the handbook through the
//! repository, builds navigation once, and writes the static site.
//!
//! ## Generated Pages
//!
//! - **Home page** (`/index.html`): name, headline, social links and
//!   call-to-action buttons from [`PersonalInfo`]
//! - **Handbook index** (`/handbook/index.html`): the introduction page
//!   followed by a contents listing, one anchored section per category
//! - **Handbook pages** (`/handbook/{slug}/index.html`): sidebar, breadcrumbs,
//!   article, table of contents, prev/next links and FAQ
//! - **404 page**, **sitemap.xml** and **robots.txt**
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── sitemap.xml
//! ├── robots.txt
//! └── handbook/
//!     ├── index.html
//!     ├── ownership/
//!     │   └── index.html
//!     └── ...
//! ```
//!
//! Pages without a category are still written (reachable by URL and listed
//! in the sitemap) but appear in neither the sidebar nor the prev/next chain.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Interpolated text is escaped; rendered markdown and JSON-LD are inserted
//! with `PreEscaped` (see [`crate::markdown`] for the trust boundary).
//! The stylesheet is `static/style.css`, embedded at compile time and
//! prefixed with CSS custom properties generated from `[colors]`.

use crate::config::{self, ConfigError, SiteConfig};
use crate::navigation::{self, prev_next};
use crate::personal::PersonalInfo;
use crate::repository::{ContentError, ContentRepository};
use crate::seo::{self, MetaTag};
use crate::sitemap::{self, SitemapError};
use crate::types::{FaqEntry, NavItem, Navigation, Page, PrevNext, TocEntry};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Sitemap(#[from] SitemapError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a build wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    /// Written files relative to `output_dir`, in write order.
    pub files: Vec<String>,
    /// Handbook pages rendered, introduction included.
    pub pages: usize,
    pub categories: usize,
    /// Slugs rendered but absent from navigation.
    pub unlisted: Vec<String>,
}

/// Everything a page renderer needs, resolved once per build.
struct Site<'a> {
    config: &'a SiteConfig,
    personal: &'a PersonalInfo,
    nav: Navigation,
    flat: Vec<NavItem>,
    css: String,
}

/// Head metadata for one document.
struct Head {
    title: String,
    description: String,
    canonical: String,
    meta: Vec<MetaTag>,
    json_ld: Vec<Value>,
}

/// Build the whole site from `source_root` into `output_dir`.
pub fn build(
    config: &SiteConfig,
    source_root: &Path,
    output_dir: &Path,
    personal: &PersonalInfo,
) -> Result<BuildSummary, GenerateError> {
    let repo = ContentRepository::new(config.handbook_dir(source_root));
    let nav = navigation::build_navigation(&repo)?;
    let flat = nav.flatten();
    let pages = repo.load_all()?;
    let slugs: Vec<String> = pages.iter().map(|(file, _)| file.slug.clone()).collect();
    tracing::info!(
        pages = pages.len(),
        categories = nav.categories.len(),
        "building site"
    );

    let site = Site {
        config,
        personal,
        css: format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC),
        nav,
        flat,
    };
    let mut summary = BuildSummary {
        output_dir: output_dir.to_path_buf(),
        categories: site.nav.categories.len(),
        ..BuildSummary::default()
    };
    let handbook_out = config.handbook.path.trim_matches('/');

    write_file(output_dir, "index.html", &render_home(&site).into_string(), &mut summary)?;

    let intro = pages
        .iter()
        .find(|(file, _)| file.slug.is_empty())
        .map(|(_, page)| page);
    if intro.is_some() {
        summary.pages += 1;
    }
    write_file(
        output_dir,
        &format!("{handbook_out}/index.html"),
        &render_handbook_index(&site, intro).into_string(),
        &mut summary,
    )?;

    for (file, page) in pages.iter().filter(|(file, _)| !file.slug.is_empty()) {
        let slug = &file.slug;
        if !site.nav.contains(slug) {
            tracing::debug!(slug = %slug, "page has no category, rendered but not in navigation");
            summary.unlisted.push(slug.clone());
        }
        write_file(
            output_dir,
            &format!("{handbook_out}/{slug}/index.html"),
            &render_page(&site, page).into_string(),
            &mut summary,
        )?;
        summary.pages += 1;
    }

    write_file(output_dir, "404.html", &render_not_found(&site).into_string(), &mut summary)?;
    write_file(
        output_dir,
        "sitemap.xml",
        &sitemap::render_sitemap(config, &slugs)?,
        &mut summary,
    )?;
    write_file(output_dir, "robots.txt", &sitemap::render_robots(config), &mut summary)?;

    tracing::info!(files = summary.files.len(), output = %output_dir.display(), "site generated");
    Ok(summary)
}

fn write_file(
    output_dir: &Path,
    relative: &str,
    contents: &str,
    summary: &mut BuildSummary,
) -> Result<(), GenerateError> {
    let path = output_dir.join(relative);
    let io_err = |source: std::io::Error| GenerateError::Io {
        path: path.clone(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&path, contents).map_err(io_err)?;
    tracing::debug!(file = relative, "wrote");
    summary.files.push(relative.to_string());
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &Site, head: &Head, body_class: Option<&str>, content: Markup) -> Markup {
    let config = site.config;
    html! {
        (DOCTYPE)
        html lang=(config.site.language) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (head.title) }
                @if !head.description.is_empty() {
                    meta name="description" content=(head.description);
                }
                link rel="canonical" href=(head.canonical);
                @for tag in &head.meta {
                    meta property=[(tag.attr == seo::MetaAttr::Property).then_some(tag.key)]
                        name=[(tag.attr == seo::MetaAttr::Name).then_some(tag.key)]
                        content=(tag.content);
                }
                @for ld in &head.json_ld {
                    script type="application/ld+json" { (PreEscaped(seo::script_json(ld))) }
                }
                @if let Some(id) = &config.analytics.measurement_id {
                    (analytics_tag(id))
                }
                style { (PreEscaped(&site.css)) }
            }
            body class=[body_class] {
                (site_header(site))
                (content)
                footer.site-footer {
                    p { "© " (site.personal.name) }
                }
            }
        }
    }
}

/// Google tag snippet. The id is embedded as a JSON string literal.
fn analytics_tag(id: &str) -> Markup {
    let id_literal = seo::script_json(&Value::String(id.to_string()));
    html! {
        script async src={ "https://www.googletagmanager.com/gtag/js?id=" (id) } {}
        script {
            (PreEscaped(format!(
                "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config',{id_literal});"
            )))
        }
    }
}

/// Renders the site header with the top-level links
fn site_header(site: &Site) -> Markup {
    html! {
        header.site-header {
            a.site-name href="/" { (site.personal.name) }
            nav.site-nav {
                a href=(site.config.handbook_path("")) { (site.config.handbook.title) }
            }
        }
    }
}

/// Renders the handbook sidebar, highlighting the current page and category
fn render_sidebar(site: &Site, current_slug: &str) -> Markup {
    let current_category = site.nav.category_of(current_slug).map(|c| c.slug.as_str());
    html! {
        nav.sidebar aria-label="Handbook" {
            a.sidebar-home.current[current_slug.is_empty()]
                href=(site.config.handbook_path("")) {
                (site.nav.introduction.as_ref().map_or(site.config.handbook.title.as_str(), |i| i.title.as_str()))
            }
            @for category in &site.nav.categories {
                section.sidebar-category.current[current_category == Some(category.slug.as_str())] {
                    h2 { (category.name) }
                    ul {
                        @for item in &category.items {
                            li class=[(item.slug == current_slug).then_some("current")] {
                                a href=(site.config.handbook_path(&item.slug)) { (item.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_breadcrumbs(crumbs: &[seo::Breadcrumb]) -> Markup {
    html! {
        nav.breadcrumb aria-label="Breadcrumb" {
            ol {
                @for (i, crumb) in crumbs.iter().enumerate() {
                    @if i + 1 == crumbs.len() {
                        li aria-current="page" { (crumb.name) }
                    } @else {
                        li { a href=(crumb.url) { (crumb.name) } }
                    }
                }
            }
        }
    }
}

fn render_toc(toc: &[TocEntry]) -> Markup {
    html! {
        @if !toc.is_empty() {
            aside.toc {
                h2 { "On this page" }
                ul {
                    @for entry in toc {
                        li class={ "toc-h" (entry.level) } {
                            a href={ "#" (entry.id) } { (entry.text) }
                        }
                    }
                }
            }
        }
    }
}

fn render_faq(faq: &[FaqEntry]) -> Markup {
    html! {
        @if !faq.is_empty() {
            section.faq {
                h2 id="faq" { "FAQ" }
                @for entry in faq {
                    details {
                        summary { (entry.question) }
                        p { (entry.answer) }
                    }
                }
            }
        }
    }
}

fn render_pager(site: &Site, links: PrevNext) -> Markup {
    html! {
        @if links.previous.is_some() || links.next.is_some() {
            nav.pager {
                @if let Some(prev) = links.previous {
                    a.prev rel="prev" href=(site.config.handbook_path(&prev.slug)) {
                        span.pager-label { "Previous" }
                        (prev.title)
                    }
                }
                @if let Some(next) = links.next {
                    a.next rel="next" href=(site.config.handbook_path(&next.slug)) {
                        span.pager-label { "Next" }
                        (next.title)
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page
fn render_home(site: &Site) -> Markup {
    let config = site.config;
    let info = site.personal;
    let head = Head {
        title: config.site.name.clone(),
        description: config.site.description.clone(),
        canonical: config.absolute_url("/"),
        meta: Vec::new(),
        json_ld: vec![
            seo::person_json_ld(config, info),
            seo::website_json_ld(config),
        ],
    };

    let content = html! {
        main.home {
            h1 { (info.name) }
            p.headline { (info.title) }
            @let links = info.social_links();
            @if !links.is_empty() {
                ul.social {
                    @for (label, url) in links {
                        li { a href=(url) rel="me" { (label) } }
                    }
                }
            }
            div.cta {
                a.button href=(config.handbook_path("")) { "Read the handbook" }
                @if let Some(link) = &info.consultation_link {
                    a.button.secondary href=(link) {
                        "Book a consultation"
                        @if let Some(price) = &info.consultation_price {
                            " " span.price { "(" (price) ")" }
                        }
                    }
                }
            }
        }
    };

    base_document(site, &head, Some("home-page"), content)
}

/// Renders the handbook index: introduction plus a contents listing
fn render_handbook_index(site: &Site, intro: Option<&Page>) -> Markup {
    let config = site.config;
    let crumbs = match intro {
        Some(page) => seo::breadcrumbs(config, page),
        None => seo::handbook_root_breadcrumbs(config),
    };
    let mut json_ld = vec![seo::breadcrumb_json_ld(&crumbs)];
    if let Some(faq) = intro.and_then(|p| seo::faq_json_ld(&p.meta.faq)) {
        json_ld.push(faq);
    }
    let head = Head {
        title: match intro {
            Some(page) => format!("{} | {}", page.meta.title, config.site.name),
            None => format!("{} | {}", config.handbook.title, config.site.name),
        },
        description: intro
            .map(|p| p.meta.description.as_str())
            .filter(|d| !d.is_empty())
            .unwrap_or(&config.handbook.description)
            .to_string(),
        canonical: config.handbook_url(""),
        meta: Vec::new(),
        json_ld,
    };
    let links = if intro.is_some() {
        prev_next(&site.flat, "")
    } else {
        PrevNext {
            previous: None,
            next: site.flat.first(),
        }
    };

    let content = html! {
        div.handbook {
            (render_sidebar(site, ""))
            main.handbook-main {
                (render_breadcrumbs(&crumbs))
                article.content {
                    @match intro {
                        Some(page) => { (PreEscaped(&page.content_html)) }
                        None => { h1 { (config.handbook.title) } }
                    }
                }
                section.contents {
                    @for category in &site.nav.categories {
                        h2 id=(category.slug) { (category.name) }
                        ul {
                            @for item in &category.items {
                                li { a href=(config.handbook_path(&item.slug)) { (item.title) } }
                            }
                        }
                    }
                }
                @if let Some(page) = intro {
                    (render_faq(&page.meta.faq))
                }
                (render_pager(site, links))
            }
            @if let Some(page) = intro {
                (render_toc(&page.toc))
            }
        }
    };

    base_document(site, &head, Some("handbook-index"), content)
}

/// Renders one handbook page
fn render_page(site: &Site, page: &Page) -> Markup {
    let config = site.config;
    let meta = &page.meta;
    let crumbs = seo::breadcrumbs(config, page);

    let mut json_ld = vec![
        seo::article_json_ld(config, &site.personal.name, page),
        seo::breadcrumb_json_ld(&crumbs),
    ];
    if let Some(faq) = seo::faq_json_ld(&meta.faq) {
        json_ld.push(faq);
    }
    let head = Head {
        title: format!("{} | {}", meta.title, config.handbook.title),
        description: meta.description.clone(),
        canonical: config.handbook_url(&meta.slug),
        meta: seo::open_graph(config, page),
        json_ld,
    };

    let content = html! {
        div.handbook {
            (render_sidebar(site, &meta.slug))
            main.handbook-main {
                (render_breadcrumbs(&crumbs))
                article.content {
                    (PreEscaped(&page.content_html))
                }
                (render_faq(&meta.faq))
                (render_pager(site, prev_next(&site.flat, &meta.slug)))
            }
            (render_toc(&page.toc))
        }
    };

    base_document(site, &head, Some("handbook-page"), content)
}

/// Renders the 404 page
fn render_not_found(site: &Site) -> Markup {
    let config = site.config;
    let head = Head {
        title: format!("Page not found | {}", config.site.name),
        description: String::new(),
        canonical: config.absolute_url("/404.html"),
        meta: Vec::new(),
        json_ld: Vec::new(),
    };

    let content = html! {
        main.not-found {
            h1 { "Page not found" }
            p { "Nothing lives at this address." }
            p {
                a href="/" { "Home" }
                " · "
                a href=(config.handbook_path("")) { (config.handbook.title) }
            }
        }
    };

    base_document(site, &head, Some("not-found"), content)
}

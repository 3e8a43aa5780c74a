//! Search-engine metadata for rendered pages.
//!
//! Everything here is a pure function of the site config and a page:
//! breadcrumb trails, schema.org JSON-LD blocks and Open Graph / Twitter
//! meta tags. Nothing fails; fields that need a category are simply left
//! out for uncategorized pages.
//!
//! ## Breadcrumb trails
//!
//! ```text
//! introduction        Home > Handbook
//! uncategorized page  Home > Handbook > Page
//! categorized page    Home > Handbook > Category > Page
//! ```
//!
//! The category crumb points at the category's anchor on the handbook
//! index (`/handbook/#fundamentals`).

use crate::config::SiteConfig;
use crate::naming::slugify;
use crate::personal::PersonalInfo;
use crate::types::{FaqEntry, Page};
use serde::Serialize;
use serde_json::{Value, json};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// One step of a breadcrumb trail, with an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

/// A `<meta>` tag. Open Graph uses `property`, Twitter uses `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub attr: MetaAttr,
    pub key: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    Property,
    Name,
}

impl MetaAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Property => "property",
            MetaAttr::Name => "name",
        }
    }
}

impl MetaTag {
    fn property(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Property,
            key,
            content: content.into(),
        }
    }

    fn name(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Name,
            key,
            content: content.into(),
        }
    }
}

/// Home → Handbook, the trail every handbook page starts with.
pub fn handbook_root_breadcrumbs(site: &SiteConfig) -> Vec<Breadcrumb> {
    vec![
        Breadcrumb {
            name: "Home".to_string(),
            url: site.absolute_url("/"),
        },
        Breadcrumb {
            name: site.handbook.title.clone(),
            url: site.handbook_url(""),
        },
    ]
}

/// Breadcrumb trail for a handbook page.
pub fn breadcrumbs(site: &SiteConfig, page: &Page) -> Vec<Breadcrumb> {
    let mut crumbs = handbook_root_breadcrumbs(site);
    if page.meta.is_introduction() {
        return crumbs;
    }

    if let Some(category) = &page.meta.category {
        crumbs.push(Breadcrumb {
            name: category.clone(),
            url: format!("{}#{}", site.handbook_url(""), slugify(category)),
        });
    }
    crumbs.push(Breadcrumb {
        name: page.meta.title.clone(),
        url: site.handbook_url(&page.meta.slug),
    });
    crumbs
}

/// `BreadcrumbList` structured data for a trail.
pub fn breadcrumb_json_ld(crumbs: &[Breadcrumb]) -> Value {
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": crumb.name,
                "item": crumb.url,
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// `TechArticle` structured data for a handbook page.
pub fn article_json_ld(site: &SiteConfig, author: &str, page: &Page) -> Value {
    let meta = &page.meta;
    let person = json!({
        "@type": "Person",
        "name": author,
        "url": site.absolute_url("/"),
    });

    let mut article = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "TechArticle",
        "headline": meta.title,
        "description": meta.description,
        "keywords": meta.keywords.join(", "),
        "url": site.handbook_url(&meta.slug),
        "mainEntityOfPage": site.handbook_url(&meta.slug),
        "inLanguage": site.site.language,
        "wordCount": page.word_count,
        "author": person,
        "publisher": person,
        "isPartOf": {
            "@type": "Book",
            "name": site.handbook.title,
            "url": site.handbook_url(""),
        },
    });
    if let (Some(category), Some(obj)) = (&meta.category, article.as_object_mut()) {
        obj.insert("articleSection".to_string(), json!(category));
    }
    article
}

/// `FAQPage` structured data, or `None` when there are no entries.
pub fn faq_json_ld(faq: &[FaqEntry]) -> Option<Value> {
    if faq.is_empty() {
        return None;
    }
    let questions: Vec<Value> = faq
        .iter()
        .map(|entry| {
            json!({
                "@type": "Question",
                "name": entry.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": entry.answer,
                },
            })
        })
        .collect();

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    }))
}

/// Open Graph and Twitter card tags for a handbook page.
pub fn open_graph(site: &SiteConfig, page: &Page) -> Vec<MetaTag> {
    let meta = &page.meta;
    let mut tags = vec![
        MetaTag::property("og:title", &meta.title),
        MetaTag::property("og:description", &meta.description),
        MetaTag::property("og:type", "article"),
        MetaTag::property("og:url", site.handbook_url(&meta.slug)),
        MetaTag::property("og:site_name", &site.site.name),
        MetaTag::property("og:locale", og_locale(&site.site.language)),
    ];
    if let Some(category) = &meta.category {
        tags.push(MetaTag::property("article:section", category));
    }
    tags.extend(
        meta.keywords
            .iter()
            .map(|keyword| MetaTag::property("article:tag", keyword)),
    );
    tags.push(MetaTag::name("twitter:card", "summary"));
    tags.push(MetaTag::name("twitter:title", &meta.title));
    tags.push(MetaTag::name("twitter:description", &meta.description));
    tags
}

/// `en` → `en`, `en-US` → `en_US`.
fn og_locale(language: &str) -> String {
    language.replace('-', "_")
}

/// `Person` structured data for the home page.
pub fn person_json_ld(site: &SiteConfig, info: &PersonalInfo) -> Value {
    let same_as: Vec<&str> = info.social_links().into_iter().map(|(_, url)| url).collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Person",
        "name": info.name,
        "jobTitle": info.title,
        "url": site.absolute_url("/"),
        "sameAs": same_as,
    })
}

/// `WebSite` structured data for the home page.
pub fn website_json_ld(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.site.name,
        "description": site.site.description,
        "url": site.absolute_url("/"),
        "inLanguage": site.site.language,
    })
}

/// Serialize JSON-LD for a `<script>` element.
///
/// `</` is written as `<\/` so page text can never close the script early.
pub fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

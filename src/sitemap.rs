//! `sitemap.xml` and `robots.txt`.
//!
//! The sitemap lists the home page, the handbook root and one URL per
//! handbook slug, all absolute. The introduction's empty slug is the
//! handbook root, so it is never listed twice.

use crate::config::SiteConfig;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("XML write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Sitemap is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Every absolute URL the sitemap lists, in output order.
pub fn sitemap_urls(site: &SiteConfig, slugs: &[String]) -> Vec<String> {
    let mut urls = vec![site.absolute_url("/"), site.handbook_url("")];
    urls.extend(
        slugs
            .iter()
            .filter(|slug| !slug.is_empty())
            .map(|slug| site.handbook_url(slug)),
    );
    urls
}

/// Render the sitemap document.
pub fn render_sitemap(site: &SiteConfig, slugs: &[String]) -> Result<String, SitemapError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for url in sitemap_urls(site, slugs) {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(&url)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// `robots.txt` allowing everything and pointing at the sitemap.
pub fn render_robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.absolute_url("/sitemap.xml")
    )
}

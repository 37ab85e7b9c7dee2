//! Sitemap generation.
//!
//! Lists every route the presentation layer serves: static pages, listing
//! pages past the first, documents, category pages and tag pages.

use std::{collections::HashSet, io::Write};

use chrono::{DateTime, Utc};
use quire_core::{
    Config, DocumentSummary,
    routes::{category_path, listing_page_path, post_path, tag_path},
};
use tracing::debug;

use crate::{index::CollectionIndex, pagination::total_pages};

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    /// Absolute URL.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<DateTime<Utc>>,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Sitemap entries in emission order, without duplicate locations.
    pub fn urls(&self, index: &CollectionIndex) -> Vec<SitemapUrl> {
        let pages = total_pages(index.len(), self.config.build.posts_per_page);

        let static_routes = self.config.sitemap.static_routes.iter().cloned();
        let listing_routes = (2..=pages).map(listing_page_path);
        let plain = static_routes
            .chain(listing_routes)
            .map(|route| (route, None));

        let documents = index
            .all()
            .iter()
            .map(|doc| (post_path(doc.slug()), Some(last_modified(doc))));

        let terms = index
            .all_categories()
            .iter()
            .map(|c| category_path(c))
            .chain(index.all_tags().iter().map(|t| tag_path(t)))
            .map(|route| (route, None))
            .collect::<Vec<_>>();

        let mut seen = HashSet::new();
        plain
            .chain(documents)
            .chain(terms)
            .map(|(route, lastmod)| SitemapUrl {
                loc: self.config.absolute_url(&route),
                lastmod,
            })
            .filter(|url| seen.insert(url.loc.clone()))
            .collect()
    }

    /// Generate sitemap XML.
    pub fn generate(&self, index: &CollectionIndex) -> String {
        let urls = self.urls(index);
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &urls {
            xml.push_str(&url_to_xml(url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to a writer.
    pub fn write_to<W: Write>(&self, index: &CollectionIndex, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.generate(index).as_bytes())
    }
}

/// `updated` when present, otherwise the publication date.
fn last_modified(doc: &DocumentSummary) -> DateTime<Utc> {
    doc.frontmatter
        .updated_at
        .unwrap_or(doc.frontmatter.published)
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = &url.lastmod {
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            lastmod.format("%Y-%m-%d")
        ));
    }

    xml.push_str("  </url>\n");
    xml
}

/// Escape the five XML-reserved characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

//! RSS feed generation.
//!
//! Generates an RSS 2.0 feed with one item per document, newest first. The
//! output carries no build timestamp, so an unchanged collection always
//! produces the same bytes.

use std::io::Write;

use quire_core::{Config, DocumentSummary, routes::post_path};
use rss::{Category, ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

use crate::index::CollectionIndex;

/// Date format used for `<pubDate>`.
pub const RSS_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum RssError {
    /// The channel could not be serialized.
    #[error("RSS build error: {0}")]
    Build(#[from] rss::Error),

    /// Serialized output was not valid UTF-8.
    #[error("RSS output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RSS operations.
pub type Result<T> = std::result::Result<T, RssError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
}

impl RssGenerator {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate RSS feed XML.
    ///
    /// `lastBuildDate` is left unset so the feed only changes when the
    /// collection does.
    pub fn generate(&self, index: &CollectionIndex) -> Result<String> {
        let limit = self.config.rss.limit.unwrap_or(usize::MAX);

        let items: Vec<Item> = index
            .all()
            .iter()
            .take(limit)
            .map(|doc| self.document_to_item(doc))
            .collect();

        debug!(count = items.len(), limit = ?self.config.rss.limit, "generating RSS feed");

        let channel = ChannelBuilder::default()
            .title(self.config.site.title.as_str())
            .link(self.config.absolute_url("/"))
            .description(self.config.site.description.as_str())
            .items(items)
            .build();

        let bytes = channel.write_to(Vec::new())?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Convert a document to an RSS item.
    fn document_to_item(&self, doc: &DocumentSummary) -> Item {
        let url = self.config.absolute_url(&post_path(doc.slug()));
        let fm = &doc.frontmatter;

        let guid = GuidBuilder::default().value(url.as_str()).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(fm.title.clone()));
        builder.link(Some(url));
        builder.guid(Some(guid));
        builder.description(Some(fm.excerpt.clone()));
        builder.pub_date(Some(fm.published.format(RSS_DATE_FORMAT).to_string()));
        builder.categories(vec![Category {
            name: fm.category.clone(),
            domain: None,
        }]);

        builder.build()
    }

    /// Write RSS feed to a writer.
    pub fn write_to<W: Write>(&self, index: &CollectionIndex, writer: &mut W) -> Result<()> {
        let xml = self.generate(index)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}

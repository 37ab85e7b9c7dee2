//! Document types and derived metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// Reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_time_minutes(body: &str) -> usize {
    body.split_whitespace()
        .count()
        .div_ceil(WORDS_PER_MINUTE)
        .max(1)
}

/// Human-readable reading time, e.g. `"4 min read"`.
pub fn reading_time_text(body: &str) -> String {
    format!("{} min read", reading_time_minutes(body))
}

/// A document without its raw body, as used by listings and artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Validated metadata.
    #[serde(flatten)]
    pub frontmatter: Frontmatter,

    /// Reading-time estimate computed from the raw body.
    pub reading_time_text: String,

    /// Source file this document was loaded from.
    #[serde(skip)]
    pub source_path: PathBuf,
}

impl DocumentSummary {
    pub fn slug(&self) -> &str {
        &self.frontmatter.slug
    }

    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    pub fn category(&self) -> &str {
        &self.frontmatter.category
    }

    pub fn tags(&self) -> &[String] {
        &self.frontmatter.tags
    }

    pub fn published(&self) -> DateTime<Utc> {
        self.frontmatter.published
    }

    /// Publication date formatted for listings, e.g. `Jan 4, 2024`.
    pub fn display_date(&self) -> String {
        self.frontmatter.published.format("%b %-d, %Y").to_string()
    }
}

/// A fully loaded document: metadata plus raw body.
///
/// Constructed once per pipeline run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    summary: DocumentSummary,
    body: String,
}

impl Document {
    /// Build a document, deriving the reading-time estimate from `body`.
    pub fn new(frontmatter: Frontmatter, body: String, source_path: impl Into<PathBuf>) -> Self {
        let summary = DocumentSummary {
            frontmatter,
            reading_time_text: reading_time_text(&body),
            source_path: source_path.into(),
        };
        Self { summary, body }
    }

    pub fn summary(&self) -> &DocumentSummary {
        &self.summary
    }

    pub fn frontmatter(&self) -> &Frontmatter {
        &self.summary.frontmatter
    }

    pub fn slug(&self) -> &str {
        self.summary.slug()
    }

    /// Raw source text after the metadata header.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn source_path(&self) -> &Path {
        &self.summary.source_path
    }

    /// Attach rendered HTML for the detail view.
    pub fn into_rendered(self, html: String, toc: Vec<TocEntry>) -> RenderedDocument {
        RenderedDocument {
            summary: self.summary,
            body: self.body,
            html,
            toc,
        }
    }
}

/// Table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,

    /// Heading text.
    pub text: String,

    /// Anchor ID for linking.
    pub id: String,
}

/// Document with rendered HTML, as served by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    #[serde(flatten)]
    pub summary: DocumentSummary,

    /// Raw source body.
    #[serde(rename = "content")]
    pub body: String,

    /// Rendered HTML.
    #[serde(rename = "contentHtml")]
    pub html: String,

    /// Headings in document order.
    pub toc: Vec<TocEntry>,
}

//! JSON search projection for client-side search.
//!
//! The whole index is shipped to the browser, which runs a case-insensitive
//! substring match over a few fields per document. There is no inverted
//! index: collections are small and the projection is the wire format.

use quire_core::DocumentSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;

/// Maximum recommended size for the serialized index (500KB).
pub const MAX_SEARCH_INDEX_SIZE: usize = 500 * 1024;

/// One searchable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,

    /// Publication date exactly as written in the source document.
    pub date: String,
}

impl SearchDocument {
    /// Project a document summary onto the searchable fields.
    pub fn from_summary(summary: &DocumentSummary) -> Self {
        let fm = &summary.frontmatter;
        Self {
            slug: fm.slug.clone(),
            title: fm.title.clone(),
            excerpt: fm.excerpt.clone(),
            tags: fm.tags.clone(),
            category: fm.category.clone(),
            date: fm.date.clone(),
        }
    }

    /// Text the query is matched against: title, excerpt, category and tags
    /// separated by single spaces.
    pub fn haystack(&self) -> String {
        let mut text = format!("{} {} {}", self.title, self.excerpt, self.category);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }

    fn matches(&self, needle: &str) -> bool {
        self.haystack().to_lowercase().contains(needle)
    }
}

/// The search index: documents in collection order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    /// Build the projection from summaries, keeping their order.
    pub fn from_summaries<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a DocumentSummary>,
    {
        let documents: Vec<_> = summaries
            .into_iter()
            .map(SearchDocument::from_summary)
            .collect();

        info!(documents = documents.len(), "Built search index");
        Self { documents }
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Case-insensitive substring search.
    ///
    /// A blank query matches every document. Results keep index order.
    pub fn search(&self, query: &str) -> Vec<&SearchDocument> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.documents.iter().collect();
        }

        self.documents
            .iter()
            .filter(|doc| doc.matches(&needle))
            .collect()
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        self.check_size(json.len());
        Ok(json)
    }

    /// Serialize the index to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        self.check_size(json.len());
        Ok(json)
    }

    /// Deserialize an index from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn check_size(&self, size: usize) {
        if size > MAX_SEARCH_INDEX_SIZE {
            warn!(
                size,
                max = MAX_SEARCH_INDEX_SIZE,
                documents = self.documents.len(),
                "Search index exceeds recommended size"
            );
        }
    }
}

//! In-memory collection index.
//!
//! Holds the loaded documents newest first together with lookup tables by
//! slug, category and tag. The index is built once from a successful load and
//! never patched afterwards.

use std::collections::{BTreeSet, HashMap};

use quire_core::{CoreError, Document, DocumentSummary, slugify};
use tracing::debug;

use crate::collector::{self, ContentCollector};

/// Fail on the first slug that appears twice, in slice order.
pub fn ensure_unique_slugs(documents: &[Document]) -> quire_core::Result<()> {
    let mut seen: HashMap<&str, &Document> = HashMap::with_capacity(documents.len());

    for doc in documents {
        if let Some(first) = seen.insert(doc.slug(), doc) {
            return Err(CoreError::duplicate_slug(
                doc.slug(),
                first.source_path(),
                doc.source_path(),
            ));
        }
    }

    Ok(())
}

/// Documents plus lookup structures.
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    documents: Vec<Document>,
    summaries: Vec<DocumentSummary>,
    by_slug: HashMap<String, usize>,
}

impl CollectionIndex {
    /// Build an index from loaded documents.
    ///
    /// Documents are stably sorted by publication date, newest first.
    pub fn new(mut documents: Vec<Document>) -> quire_core::Result<Self> {
        ensure_unique_slugs(&documents)?;
        documents.sort_by(|a, b| b.frontmatter().published.cmp(&a.frontmatter().published));

        let summaries = documents.iter().map(|doc| doc.summary().clone()).collect();
        let by_slug = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.slug().to_string(), i))
            .collect();

        debug!(documents = documents.len(), "built collection index");

        Ok(Self {
            documents,
            summaries,
            by_slug,
        })
    }

    /// Load the collection and index it.
    pub fn load(collector: &ContentCollector) -> collector::Result<Self> {
        Ok(Self::new(collector.load_all()?)?)
    }

    /// All document summaries, newest first.
    pub fn all(&self) -> &[DocumentSummary] {
        &self.summaries
    }

    /// All documents with their bodies, newest first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a single document.
    pub fn by_slug(&self, slug: &str) -> Option<&Document> {
        self.by_slug.get(slug).map(|&i| &self.documents[i])
    }

    /// Documents whose category slugifies to `segment`.
    ///
    /// The segment is slugified as well, so both `dev-notes` and `Dev Notes`
    /// find the same documents.
    pub fn by_category(&self, segment: &str) -> Vec<&DocumentSummary> {
        let segment = slugify(segment);
        self.summaries
            .iter()
            .filter(|s| slugify(s.category()) == segment)
            .collect()
    }

    /// Documents carrying a tag that slugifies to `segment`.
    pub fn by_tag(&self, segment: &str) -> Vec<&DocumentSummary> {
        let segment = slugify(segment);
        self.summaries
            .iter()
            .filter(|s| s.tags().iter().any(|tag| slugify(tag) == segment))
            .collect()
    }

    /// Distinct category names as written, in ordinal order.
    pub fn all_categories(&self) -> Vec<String> {
        self.summaries
            .iter()
            .map(|s| s.category().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct tag names as written, in ordinal order.
    pub fn all_tags(&self) -> Vec<String> {
        self.summaries
            .iter()
            .flat_map(|s| s.tags().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Document slugs in collection order.
    pub fn slugs(&self) -> Vec<&str> {
        self.summaries.iter().map(DocumentSummary::slug).collect()
    }
}

//! Content collection.
//!
//! Reads every document in the content directory, validates its metadata and
//! returns the collection sorted newest first. Loading is all-or-nothing: the
//! first failing document (in file name order) aborts the whole load.

use std::{
    fs,
    path::{Path, PathBuf},
};

use quire_core::{Config, CoreError, Document, frontmatter::parse_frontmatter};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::index::ensure_unique_slugs;

/// File extensions recognized as documents.
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Could not read a source file or the content directory.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not enumerate the content directory.
    #[error("failed to walk content directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A document failed to parse or validate.
    #[error(transparent)]
    Content(#[from] CoreError),
}

impl CollectorError {
    /// The offending frontmatter field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Content(err) => err.field(),
            _ => None,
        }
    }
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Loads documents from a content directory.
#[derive(Debug, Clone)]
pub struct ContentCollector {
    content_dir: PathBuf,
    default_author: String,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, default_author: impl Into<String>) -> Self {
        Self {
            content_dir: content_dir.into(),
            default_author: default_author.into(),
        }
    }

    /// Create a collector for the configured content directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.build.content_dir, &config.site.author)
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Load, validate and sort every document.
    ///
    /// The content directory is created when missing; an empty directory
    /// yields an empty collection.
    pub fn load_all(&self) -> Result<Vec<Document>> {
        info!(dir = %self.content_dir.display(), "collecting content");

        if !self.content_dir.exists() {
            fs::create_dir_all(&self.content_dir).map_err(|source| CollectorError::Io {
                path: self.content_dir.clone(),
                source,
            })?;
            info!(dir = %self.content_dir.display(), "created missing content directory");
        }

        let files = self.find_content_files()?;
        info!(count = files.len(), "found content files");

        // Collecting every result before looking at any of them keeps the
        // reported error independent of thread scheduling.
        let parsed: Vec<Result<Document>> =
            files.par_iter().map(|path| self.load_file(path)).collect();
        let mut documents = parsed.into_iter().collect::<Result<Vec<_>>>()?;

        ensure_unique_slugs(&documents)?;
        documents.sort_by(|a, b| b.frontmatter().published.cmp(&a.frontmatter().published));

        info!(documents = documents.len(), "content collection complete");
        Ok(documents)
    }

    /// Load the full collection, then pick one document.
    ///
    /// Every sibling is still validated, so a broken document anywhere in the
    /// directory fails the lookup.
    pub fn load_by_slug(&self, slug: &str) -> Result<Option<Document>> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|doc| doc.slug() == slug))
    }

    /// Document files directly inside the content directory, by file name.
    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Parse a single document.
    fn load_file(&self, path: &Path) -> Result<Document> {
        debug!(path = %path.display(), "parsing file");

        let content = fs::read_to_string(path).map_err(|source| CollectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (raw, body) = parse_frontmatter(&content, path)?;
        let frontmatter = raw.validate(path, &self.default_author)?;

        Ok(Document::new(frontmatter, body, path))
    }
}

/// Visible files with a document extension.
fn is_content_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'));

    !hidden
        && path.extension().is_some_and(|ext| {
            CONTENT_EXTENSIONS
                .iter()
                .any(|known| ext.to_string_lossy().eq_ignore_ascii_case(known))
        })
}

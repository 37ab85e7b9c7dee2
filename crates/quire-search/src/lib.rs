//! Quire Search Library
//!
//! Builds the lightweight search projection served to the client as
//! `search-index.json`, and implements the substring matching the client
//! performs over it.
//!
//! # Example
//!
//! ```no_run
//! use quire_search::SearchIndex;
//!
//! // let index = SearchIndex::from_summaries(collection.all());
//! // let json = index.to_json_pretty()?;
//! let index = SearchIndex::default();
//! assert!(index.search("rust").is_empty());
//! ```

pub mod simple;

pub use simple::{MAX_SEARCH_INDEX_SIZE, SearchDocument, SearchIndex};
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

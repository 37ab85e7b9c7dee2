//! Quire Core Library
//!
//! Core types, configuration, validation and error handling for the Quire
//! content pipeline.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod routes;
pub mod slug;

pub use config::Config;
pub use content::{Document, DocumentSummary, RenderedDocument, TocEntry};
pub use error::{CoreError, Result};
pub use frontmatter::{Author, Frontmatter, RawFrontmatter};
pub use slug::slugify;

//! Quire Generator Library
//!
//! Content loading, indexing and artifact generation for Quire.
//!
//! # Modules
//!
//! - [`collector`] - Reads and validates source documents
//! - [`index`] - In-memory collection index with slug/category/tag lookups
//! - [`pagination`] - Fixed-size listing windows
//! - [`rss`] - RSS feed generation
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`build`] - Build context and orchestration

pub mod build;
pub mod collector;
pub mod index;
pub mod pagination;
pub mod robots;
pub mod rss;
pub mod sitemap;

pub use build::{Artifact, BuildError, BuildStats, Builder, SiteBuild};
pub use collector::{CollectorError, ContentCollector};
pub use index::CollectionIndex;
pub use pagination::{Paginated, paginate};
pub use robots::RobotsGenerator;
pub use rss::RssGenerator;
pub use sitemap::SitemapGenerator;

//! Quire CLI Library
//!
//! Command implementations for the `quire` binary. Each command loads the
//! configuration, runs the content pipeline and prints a human-readable
//! summary; failures carry the offending document and field.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, show, list, search)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use quire::cmd;
//!
//! // Validate all content without writing anything
//! cmd::check::run(Path::new("quire.toml")).unwrap();
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use quire_core::{Config, Document, DocumentSummary};
pub use quire_generator::{BuildStats, Builder, CollectionIndex, ContentCollector, SiteBuild};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// quire::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

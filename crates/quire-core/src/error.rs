//! Error types for the Quire core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Quire.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Missing or malformed metadata header.
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A frontmatter field failed validation.
    #[error("Validation error in {path}: field '{field}' {message}")]
    Validation {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// Two documents resolved to the same slug.
    #[error("Duplicate slug '{slug}' in {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error for a single field.
    pub fn validation(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            path: path.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new duplicate slug error.
    pub fn duplicate_slug(
        slug: impl Into<String>,
        first: impl Into<PathBuf>,
        second: impl Into<PathBuf>,
    ) -> Self {
        Self::DuplicateSlug {
            slug: slug.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// The offending field name, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

//! Site configuration management.

use std::{path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Matches paths whose last segment carries a file extension.
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/[^/]+\.[a-z0-9]+$").expect("file extension pattern is valid")
});

/// Main configuration structure for Quire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Search index settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Robots.txt settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, used as the feed channel title.
    pub title: String,

    /// Origin of the deployed site (e.g., "https://example.com").
    pub host: String,

    /// Sub-path the site is served under (e.g., "/blog"), empty for the root.
    #[serde(default)]
    pub base_path: String,

    /// Site description for the feed channel.
    #[serde(default = "default_description")]
    pub description: String,

    /// Author name used when a document does not name one.
    #[serde(default = "default_author")]
    pub author: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the source documents.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Output directory for generated artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Number of documents per listing page.
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,

    /// Syntax highlighting theme name.
    #[serde(default = "default_syntax_theme")]
    pub syntax_theme: String,
}

/// Search index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Whether the search index is generated.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether the JSON is pretty-printed.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Whether the RSS feed is generated.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items in the feed; all documents when absent.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Sitemap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Routes rendered by the presentation layer that do not come from content.
    #[serde(default = "default_static_routes")]
    pub static_routes: Vec<String>,
}

/// Robots.txt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsConfig {
    /// Whether robots.txt is generated.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// Default value functions
fn default_description() -> String {
    "A static blog built from Markdown content.".to_string()
}

fn default_author() -> String {
    "Anonymous".to_string()
}

fn default_content_dir() -> String {
    "content/posts".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_posts_per_page() -> usize {
    6
}

fn default_syntax_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_static_routes() -> Vec<String> {
    ["/", "/blog", "/search", "/about", "/studio"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            host: "https://example.com".to_string(),
            base_path: String::new(),
            description: default_description(),
            author: default_author(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            posts_per_page: default_posts_per_page(),
            syntax_theme: default_syntax_theme(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pretty: true,
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: None,
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            static_routes: default_static_routes(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, letting `QUIRE__SECTION__KEY` environment variables
    /// override file values.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("QUIRE").separator("__"))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and normalize URL parts.
    pub fn validate(&mut self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.host.trim().is_empty() {
            return Err(CoreError::config("site.host cannot be empty"));
        }

        if self.build.posts_per_page == 0 {
            return Err(CoreError::config("build.posts_per_page must be at least 1"));
        }

        if self.site.host.ends_with('/') {
            tracing::warn!(host = %self.site.host, "site.host should not have a trailing slash");
            self.site.host = self.site.host.trim_end_matches('/').to_string();
        }

        let base_path = self.site.base_path.trim().trim_end_matches('/').to_string();
        self.site.base_path = if base_path.is_empty() || base_path.starts_with('/') {
            base_path
        } else {
            tracing::warn!(%base_path, "site.base_path should start with a slash");
            format!("/{base_path}")
        };

        Ok(())
    }

    /// Prefix a site-relative path with the base path.
    ///
    /// Adds a leading slash, and a trailing slash unless the path already has
    /// one or names a file (`/feed.xml`).
    pub fn with_base_path(&self, path: &str) -> String {
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        let with_slash = if normalized.ends_with('/') || FILE_EXTENSION.is_match(&normalized) {
            normalized
        } else {
            format!("{normalized}/")
        };

        format!("{}{with_slash}", self.site.base_path)
    }

    /// Get the canonical absolute URL for a site-relative path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site.host, self.with_base_path(path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn create_test_config() -> String {
        r#"
[site]
title = "Test Site"
host = "https://example.com/"
base_path = "/blog/"
description = "A test site"
author = "Ada"

[build]
content_dir = "posts"
output_dir = "dist"
posts_per_page = 10
syntax_theme = "InspiredGitHub"

[search]
pretty = false

[rss]
limit = 15

[sitemap]
static_routes = ["/", "/about"]

[robots]
enabled = false
"#
        .to_string()
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("quire.toml");
        let mut file = std::fs::File::create(&config_path).expect("create file");
        file.write_all(create_test_config().as_bytes())
            .expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.title, "Test Site");
        assert_eq!(config.site.host, "https://example.com");
        assert_eq!(config.site.base_path, "/blog");
        assert_eq!(config.site.description, "A test site");
        assert_eq!(config.site.author, "Ada");
        assert_eq!(config.build.content_dir, "posts");
        assert_eq!(config.build.output_dir, "dist");
        assert_eq!(config.build.posts_per_page, 10);
        assert_eq!(config.build.syntax_theme, "InspiredGitHub");
        assert!(config.search.enabled);
        assert!(!config.search.pretty);
        assert_eq!(config.rss.limit, Some(15));
        assert_eq!(config.sitemap.static_routes, vec!["/", "/about"]);
        assert!(!config.robots.enabled);
    }

    #[test]
    fn test_config_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("quire.toml");
        let minimal_config = r#"
[site]
title = "Minimal Site"
host = "https://example.com"
"#;
        std::fs::write(&config_path, minimal_config).expect("write");

        let config = Config::load(&config_path).expect("load config");

        assert_eq!(config.site.base_path, "");
        assert_eq!(config.site.author, "Anonymous");
        assert_eq!(config.build.content_dir, "content/posts");
        assert_eq!(config.build.output_dir, "public");
        assert_eq!(config.build.posts_per_page, 6);
        assert!(config.search.enabled);
        assert!(config.rss.enabled);
        assert_eq!(config.rss.limit, None);
        assert_eq!(config.sitemap.static_routes.len(), 5);
        assert!(config.robots.enabled);
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("quire.toml");
        std::fs::write(
            &config_path,
            "[site]\ntitle = \"Env Site\"\nhost = \"https://env.example.com\"\n",
        )
        .expect("write");

        let config = Config::load_with_env(&config_path).expect("load config");
        assert_eq!(config.site.title, "Env Site");
        assert_eq!(config.build.posts_per_page, 6);
    }

    #[test]
    fn test_with_base_path_trailing_slash_rules() {
        let config = Config::default();

        assert_eq!(config.with_base_path("/"), "/");
        assert_eq!(config.with_base_path("/blog"), "/blog/");
        assert_eq!(config.with_base_path("blog/hello"), "/blog/hello/");
        assert_eq!(config.with_base_path("/blog/"), "/blog/");
        assert_eq!(config.with_base_path("/sitemap.xml"), "/sitemap.xml");
        assert_eq!(config.with_base_path("/search-index.JSON"), "/search-index.JSON");
    }

    #[test]
    fn test_absolute_url_with_base_path() {
        let mut config = Config::default();
        config.site.host = "https://example.com".to_string();
        config.site.base_path = "/sub".to_string();

        assert_eq!(config.absolute_url("/"), "https://example.com/sub/");
        assert_eq!(
            config.absolute_url("/blog/hello"),
            "https://example.com/sub/blog/hello/"
        );
        assert_eq!(
            config.absolute_url("/sitemap.xml"),
            "https://example.com/sub/sitemap.xml"
        );
    }

    #[test]
    fn test_validate_normalizes_base_path() {
        let mut config = Config::default();
        config.site.base_path = "docs/".to_string();
        config.validate().expect("valid");
        assert_eq!(config.site.base_path, "/docs");
    }

    #[test]
    fn test_config_validation_empty_title() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config_path = dir.path().join("quire.toml");
        let config_content = r#"
[site]
title = ""
host = "https://example.com"
"#;
        std::fs::write(&config_path, config_content).expect("write");

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_config_validation_zero_page_size() {
        let mut config = Config::default();
        config.build.posts_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_not_found() {
        let result = Config::load(Path::new("/nonexistent/quire.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}

//! Build orchestration.
//!
//! A [`SiteBuild`] is the context for one pipeline run: the validated
//! configuration plus the fully built collection index. It is created once,
//! passed to whoever needs the collection, and dropped at the end of the run.
//!
//! [`Builder`] drives a full run. Every artifact is serialized in memory
//! before the first file is written, and files are staged under temporary
//! names and renamed into place only once all of them are on disk. A run
//! that fails while loading, serializing or staging leaves the output
//! directory untouched.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use quire_core::{Config, DocumentSummary, RenderedDocument};
use quire_parser::MarkdownRenderer;
use quire_search::{SearchError, SearchIndex};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentCollector},
    index::CollectionIndex,
    pagination::{Paginated, paginate},
    robots::RobotsGenerator,
    rss::{RssError, RssGenerator},
    sitemap::SitemapGenerator,
};

pub const ROBOTS_FILE: &str = "robots.txt";
pub const SITEMAP_FILE: &str = "sitemap.xml";
pub const RSS_FILE: &str = "rss.xml";
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Writing an artifact failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loading or validating content failed.
    #[error(transparent)]
    Collector(#[from] CollectorError),

    /// Search index serialization failed.
    #[error("search index error: {0}")]
    Search(#[from] SearchError),

    /// Feed serialization failed.
    #[error("feed error: {0}")]
    Rss(#[from] RssError),
}

impl BuildError {
    /// The offending frontmatter field, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Collector(err) => err.field(),
            _ => None,
        }
    }
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// A serialized artifact, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name relative to the output directory.
    pub path: &'static str,

    pub contents: String,
}

/// Build context for a single pipeline run.
#[derive(Debug, Clone)]
pub struct SiteBuild {
    config: Config,
    index: CollectionIndex,
}

impl SiteBuild {
    /// Wrap an already built index.
    #[must_use]
    pub fn new(config: Config, index: CollectionIndex) -> Self {
        Self { config, index }
    }

    /// Load the configured content directory and build the index.
    pub fn load(config: Config) -> Result<Self> {
        let collector = ContentCollector::from_config(&config);
        Self::load_from(config, &collector)
    }

    /// Load with an explicit collector.
    pub fn load_from(config: Config, collector: &ContentCollector) -> Result<Self> {
        let index = CollectionIndex::load(collector)?;
        Ok(Self::new(config, index))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &CollectionIndex {
        &self.index
    }

    /// One page of the main listing.
    pub fn listing(&self, page: usize) -> Paginated<'_, DocumentSummary> {
        paginate(self.index.all(), page, self.config.build.posts_per_page)
    }

    /// Detail view for one document, rendered on demand.
    pub fn rendered(&self, slug: &str, renderer: &MarkdownRenderer) -> Option<RenderedDocument> {
        let doc = self.index.by_slug(slug)?.clone();
        let (html, toc) = renderer.render_with_toc(doc.body());
        Some(doc.into_rendered(html, toc))
    }

    /// Search projection over the whole collection.
    pub fn search_index(&self) -> SearchIndex {
        SearchIndex::from_summaries(self.index.all())
    }

    /// Serialize every enabled artifact.
    pub fn artifacts(&self) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::with_capacity(4);

        if self.config.robots.enabled {
            artifacts.push(Artifact {
                path: ROBOTS_FILE,
                contents: RobotsGenerator::new(self.config.clone()).generate(),
            });
        }

        artifacts.push(Artifact {
            path: SITEMAP_FILE,
            contents: SitemapGenerator::new(self.config.clone()).generate(&self.index),
        });

        if self.config.rss.enabled {
            artifacts.push(Artifact {
                path: RSS_FILE,
                contents: RssGenerator::new(self.config.clone()).generate(&self.index)?,
            });
        }

        if self.config.search.enabled {
            let search = self.search_index();
            let contents = if self.config.search.pretty {
                search.to_json_pretty()?
            } else {
                search.to_json()?
            };
            artifacts.push(Artifact {
                path: SEARCH_INDEX_FILE,
                contents,
            });
        }

        Ok(artifacts)
    }
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of documents loaded.
    pub documents: usize,

    /// Number of distinct categories.
    pub categories: usize,

    /// Number of distinct tags.
    pub tags: usize,

    /// Number of main listing pages.
    pub listing_pages: usize,

    /// Artifact files written.
    pub artifacts: Vec<PathBuf>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that runs the full pipeline and writes artifacts.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Create a builder using the directories named in the configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let content_dir = PathBuf::from(&config.build.content_dir);
        let output_dir = PathBuf::from(&config.build.output_dir);
        Self::new(config, content_dir, output_dir)
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Load and index content
        let collector = ContentCollector::new(&self.content_dir, &self.config.site.author);
        let site = SiteBuild::load_from(self.config.clone(), &collector)?;

        // 2. Serialize artifacts
        let artifacts = site.artifacts()?;

        // 3. Write
        let written = self.write_artifacts(&artifacts)?;

        let index = site.index();
        let stats = BuildStats {
            documents: index.len(),
            categories: index.all_categories().len(),
            tags: index.all_tags().len(),
            listing_pages: site.listing(1).total_pages,
            artifacts: written,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            documents = stats.documents,
            categories = stats.categories,
            tags = stats.tags,
            listing_pages = stats.listing_pages,
            artifacts = stats.artifacts.len(),
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    fn write_artifacts(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
        create_dir(&self.output_dir)?;

        let mut staged = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let staging = self.output_dir.join(staging_name(artifact.path));
            if let Err(source) = fs::write(&staging, &artifact.contents) {
                remove_staged(&staged);
                let _ = fs::remove_file(&staging);
                return Err(BuildError::Io {
                    path: staging,
                    source,
                });
            }
            staged.push((staging, self.output_dir.join(artifact.path)));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (i, (staging, path)) in staged.iter().enumerate() {
            if let Err(source) = fs::rename(staging, path) {
                remove_staged(&staged[i..]);
                return Err(BuildError::Io {
                    path: path.clone(),
                    source,
                });
            }
            debug!(path = %path.display(), "wrote artifact");
            written.push(path.clone());
        }

        Ok(written)
    }
}

/// Hidden sibling name an artifact is written to before it is renamed.
fn staging_name(file: &str) -> String {
    format!(".{file}.tmp")
}

fn remove_staged(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        let _ = fs::remove_file(staging);
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.site.title = "Test Site".to_string();
        config.site.host = "https://example.com".to_string();
        config.build.posts_per_page = 1;
        config
    }

    fn write_post(dir: &Path, name: &str, title: &str, date: &str) {
        fs::write(
            dir.join(name),
            format!(
                "---\ntitle: \"{title}\"\nexcerpt: \"About {title}\"\ndate: {date}\ncategory: Dev Notes\ntags:\n  - rust\n---\n\n# {title}\n\nHello, world!\n"
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_build_empty_site() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.documents, 0);
        assert_eq!(stats.listing_pages, 1);
        assert_eq!(stats.artifacts.len(), 4);
        assert!(output_dir.path().join(SITEMAP_FILE).exists());
        assert!(output_dir.path().join(RSS_FILE).exists());
        assert_eq!(
            fs::read_to_string(output_dir.path().join(SEARCH_INDEX_FILE)).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_build_with_content() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        write_post(content_dir.path(), "first.md", "First", "2024-01-01");
        write_post(content_dir.path(), "second.md", "Second", "2024-02-01");

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.documents, 2);
        assert_eq!(stats.categories, 1);
        assert_eq!(stats.tags, 1);
        assert_eq!(stats.listing_pages, 2);

        let robots = fs::read_to_string(output_dir.path().join(ROBOTS_FILE)).unwrap();
        assert!(robots.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[test]
    fn test_disabled_artifacts_are_skipped() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        let mut config = test_config();
        config.rss.enabled = false;
        config.search.enabled = false;
        config.robots.enabled = false;

        let stats = Builder::new(config, content_dir.path(), output_dir.path())
            .build()
            .unwrap();

        assert_eq!(stats.artifacts, [output_dir.path().join(SITEMAP_FILE)]);
        assert!(!output_dir.path().join(RSS_FILE).exists());
    }

    #[test]
    fn test_failed_load_writes_nothing() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let out = output_dir.path().join("public");
        write_post(content_dir.path(), "good.md", "Good", "2024-01-01");
        fs::write(
            content_dir.path().join("bad.md"),
            "---\ntitle: Bad\ndate: 2024-01-01\ncategory: X\n---\n",
        )
        .unwrap();

        let err = Builder::new(test_config(), content_dir.path(), &out)
            .build()
            .unwrap_err();

        assert_eq!(err.field(), Some("excerpt"));
        assert!(!out.exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_artifacts() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        write_post(content_dir.path(), "post.md", "Post", "2024-01-01");

        let robots = output_dir.path().join(ROBOTS_FILE);
        fs::write(&robots, "old robots").unwrap();
        // A directory in the way makes staging the sitemap fail after
        // robots.txt has already been staged.
        fs::create_dir(output_dir.path().join(staging_name(SITEMAP_FILE))).unwrap();

        let err = Builder::new(test_config(), content_dir.path(), output_dir.path())
            .build()
            .unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
        assert_eq!(fs::read_to_string(&robots).unwrap(), "old robots");
        assert!(!output_dir.path().join(staging_name(ROBOTS_FILE)).exists());
        assert!(!output_dir.path().join(RSS_FILE).exists());
    }

    #[test]
    fn test_no_staging_files_left_after_build() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        write_post(content_dir.path(), "post.md", "Post", "2024-01-01");

        Builder::new(test_config(), content_dir.path(), output_dir.path())
            .build()
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(output_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "{leftovers:?}");
    }

    #[test]
    fn test_site_build_rendered() {
        let content_dir = TempDir::new().unwrap();
        write_post(content_dir.path(), "hello.md", "Hello", "2024-01-01");

        let collector = ContentCollector::new(content_dir.path(), "Ada");
        let site = SiteBuild::load_from(test_config(), &collector).unwrap();
        let renderer = MarkdownRenderer::new();

        let rendered = site.rendered("hello", &renderer).unwrap();
        assert!(rendered.html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert_eq!(rendered.toc.len(), 1);
        assert_eq!(rendered.summary.frontmatter.author.name, "Ada");

        assert!(site.rendered("missing", &renderer).is_none());
    }

    #[test]
    fn test_site_build_listing() {
        let content_dir = TempDir::new().unwrap();
        write_post(content_dir.path(), "a.md", "A", "2024-01-01");
        write_post(content_dir.path(), "b.md", "B", "2024-02-01");

        let collector = ContentCollector::new(content_dir.path(), "Ada");
        let site = SiteBuild::load_from(test_config(), &collector).unwrap();

        let page = site.listing(1);
        assert_eq!(page.items[0].slug(), "b");
        assert_eq!(page.total_pages, 2);
        assert_eq!(site.listing(9).items[0].slug(), "a");
    }
}

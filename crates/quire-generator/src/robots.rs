//! Robots.txt generation.

use std::io::Write;

use quire_core::Config;

use crate::build::SITEMAP_FILE;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate robots.txt: allow everything and point at the sitemap.
    pub fn generate(&self) -> String {
        let sitemap_url = self.config.absolute_url(&format!("/{SITEMAP_FILE}"));
        format!("User-agent: *\nAllow: /\n\nSitemap: {sitemap_url}\n")
    }

    /// Write robots.txt to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.generate().as_bytes())
    }
}

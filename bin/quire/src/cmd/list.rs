//! List command - paginated listings

use std::path::Path;

use color_eyre::eyre::Result;
use quire_core::{
    DocumentSummary,
    routes::{BLOG_ROUTE, category_path, post_path, tag_path},
};
use quire_generator::paginate;

use super::load_site;

/// Which listing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// The main blog listing.
    All,
    /// Documents in one category, by route segment.
    Category(String),
    /// Documents with one tag, by route segment.
    Tag(String),
}

impl Listing {
    /// Route the listing is served under.
    pub fn route(&self) -> String {
        match self {
            Self::All => BLOG_ROUTE.to_string(),
            Self::Category(segment) => category_path(segment),
            Self::Tag(segment) => tag_path(segment),
        }
    }
}

/// Print one page of a listing.
pub fn run(config_path: &Path, listing: &Listing, page: usize) -> Result<()> {
    let site = load_site(config_path)?;
    let index = site.index();

    let entries: Vec<&DocumentSummary> = match listing {
        Listing::All => index.all().iter().collect(),
        Listing::Category(segment) => index.by_category(segment),
        Listing::Tag(segment) => index.by_tag(segment),
    };

    let window = paginate(&entries, page, site.config().build.posts_per_page);
    let route = listing.route();

    println!(
        "{route} (page {} of {})",
        window.current_page, window.total_pages
    );

    if window.items.is_empty() {
        println!("  No documents.");
    }

    for summary in window.items {
        println!(
            "  {:<12}  {}  [{}]  {}",
            summary.display_date(),
            summary.title(),
            summary.category(),
            summary.reading_time_text
        );
        println!("  {:<12}  {}", "", post_path(summary.slug()));
    }

    if let Some(previous) = window.previous_path(&route) {
        println!("\n  Previous: {previous}");
    }
    if let Some(next) = window.next_path(&route) {
        println!("  Next:     {next}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_routes() {
        assert_eq!(Listing::All.route(), "/blog");
        assert_eq!(
            Listing::Category("Dev Notes".to_string()).route(),
            "/category/dev-notes"
        );
        assert_eq!(Listing::Tag("rust".to_string()).route(), "/tag/rust");
    }
}

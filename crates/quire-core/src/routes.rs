//! Site-relative routes used by the presentation layer.
//!
//! Artifacts link to the same URLs the page renderer serves, so every route
//! segment for a term goes through [`slugify`].

use crate::slug::slugify;

/// Listing index route.
pub const BLOG_ROUTE: &str = "/blog";

/// Route for a single document.
pub fn post_path(slug: &str) -> String {
    format!("{BLOG_ROUTE}/{slug}")
}

/// Route for a category listing.
pub fn category_path(category: &str) -> String {
    format!("/category/{}", slugify(category))
}

/// Route for a tag listing.
pub fn tag_path(tag: &str) -> String {
    format!("/tag/{}", slugify(tag))
}

/// Route for a page of a paginated listing rooted at `base`.
///
/// Page one is the listing itself; later pages live under `base/page/{n}`.
pub fn page_path(base: &str, page: usize) -> String {
    if page <= 1 {
        base.to_string()
    } else {
        format!("{base}/page/{page}")
    }
}

/// Route for a page of the main listing.
pub fn listing_page_path(page: usize) -> String {
    page_path(BLOG_ROUTE, page)
}

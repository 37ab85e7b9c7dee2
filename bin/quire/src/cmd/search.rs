//! Search command - query the search projection

use std::path::Path;

use color_eyre::eyre::Result;

use super::load_site;

/// Print documents matching `query`, in collection order.
pub fn run(config_path: &Path, query: &str) -> Result<()> {
    let site = load_site(config_path)?;
    let index = site.search_index();
    let results = index.search(query);

    tracing::info!(query, results = results.len(), "Search complete");

    if results.is_empty() {
        println!("No results for \"{query}\".");
        return Ok(());
    }

    println!("{} result(s) for \"{query}\":", results.len());
    for doc in results {
        println!("  {}  {}  ({})", doc.date, doc.title, doc.slug);
        println!("      {}", doc.excerpt);
    }

    Ok(())
}

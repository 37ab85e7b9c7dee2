//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use quire_core::Config;
use quire_generator::SiteBuild;

/// Run the check command.
///
/// Loads and validates every document without writing any artifact. Exits
/// with an error on the first invalid document.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Checking configuration and content");

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            return Err(e).wrap_err("Configuration check failed");
        }
    };

    println!("\nChecking content files...");
    let site = match SiteBuild::load(config) {
        Ok(site) => site,
        Err(e) => {
            println!("  ✗ {e}");
            if let Some(field) = e.field() {
                println!("    field: {field}");
            }
            return Err(e).wrap_err("Content check failed");
        }
    };

    let index = site.index();
    for summary in index.all() {
        println!(
            "  ✓ {} ({})",
            summary.slug(),
            summary.source_path.display()
        );
    }

    let listing = site.listing(1);
    println!();
    println!(
        "  {} document(s), {} categories, {} tags, {} listing page(s)",
        index.len(),
        index.all_categories().len(),
        index.all_tags().len(),
        listing.total_pages
    );
    println!("\n✓ All checks passed!");

    Ok(())
}

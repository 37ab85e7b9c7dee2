//! Build command - runs the full pipeline and writes artifacts

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use quire_generator::Builder;

use super::load_config;

/// Run the build command.
///
/// Command-line overrides replace the matching configuration values before
/// the configuration is re-validated.
pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    content: Option<&Path>,
    host: Option<&str>,
    base_path: Option<&str>,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(
        ?config_path,
        ?output,
        ?content,
        ?host,
        ?base_path,
        "Starting build"
    );

    let mut config = load_config(config_path)?;

    if let Some(output) = output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }

    if let Some(content) = content {
        config.build.content_dir = content.to_string_lossy().to_string();
    }

    if let Some(h) = host {
        tracing::info!(host = h, "Overriding site host from CLI");
        config.site.host = h.to_string();
    }

    if let Some(bp) = base_path {
        tracing::info!(base_path = bp, "Overriding site base_path from CLI");
        config.site.base_path = bp.to_string();
    }

    config
        .validate()
        .wrap_err("Invalid configuration after command-line overrides")?;

    let output_dir = config.build.output_dir.clone();
    let stats = Builder::from_config(config)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    // Print build statistics
    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Documents:  {}", stats.documents);
    println!("  Categories: {}", stats.categories);
    println!("  Tags:       {}", stats.tags);
    println!("  Pages:      {}", stats.listing_pages);
    println!("  Artifacts:  {}", stats.artifacts.len());
    for artifact in &stats.artifacts {
        println!("    - {}", artifact.display());
    }
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {output_dir}");
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

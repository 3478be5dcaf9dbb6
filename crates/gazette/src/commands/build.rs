//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gazette_static::StaticBuilder;

use crate::config::SiteConfig;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    site: Option<String>,
    minify: Option<bool>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = SiteConfig::load(config_path)?;

    let mut config = file_config.to_build_config(site);
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }

    let result = tokio::task::spawn_blocking(move || StaticBuilder::new(config).build())
        .await
        .context("Build task failed")??;

    tracing::info!(
        "Built {} pages with {} feed entries in {}ms",
        result.pages,
        result.entries,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

//! Feed-only generation command.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gazette_static::StaticBuilder;

use crate::config::SiteConfig;

/// Run the feed command.
pub async fn run(config_path: &Path, site: Option<String>, out: Option<PathBuf>) -> Result<()> {
    let file_config = SiteConfig::load(config_path)?;
    let builder = StaticBuilder::new(file_config.to_build_config(site));

    let (xml, entries) = tokio::task::spawn_blocking(move || -> Result<(String, usize)> {
        let (_, feed) = builder.build_feed()?;
        Ok((feed.to_rss()?, feed.len()))
    })
    .await
    .context("Feed task failed")??;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, &xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote feed with {} entries to {}", entries, path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(xml.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .context("Failed to write feed to stdout")?;
        }
    }

    Ok(())
}

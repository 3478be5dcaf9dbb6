//! Scaffold a new blog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const POST_DIR: &str = "src/content/blog";

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing gazette...");
    scaffold(config_path, Path::new(POST_DIR), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Set SITE or [site].url, then run 'gazette build'.");

    Ok(())
}

/// Write the default config and a sample post. Existing files are left
/// alone unless `overwrite` is set.
fn scaffold(config_path: &Path, post_dir: &Path, overwrite: bool) -> Result<()> {
    write_default(config_path, DEFAULT_CONFIG, overwrite)?;

    fs::create_dir_all(post_dir)
        .with_context(|| format!("Failed to create {}", post_dir.display()))?;
    write_default(&post_dir.join("hello-world.mdx"), DEFAULT_POST, overwrite)?;

    Ok(())
}

fn write_default(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Gazette Configuration

[site]
title = "Blog"
description = ""
# Absolute URL the site is deployed at. The SITE environment variable
# (or a SITE entry in .env) overrides this value.
url = ""
language = "en-us"

[content]
# Content root and the glob selecting blog posts beneath it
dir = "src/content"
pattern = "blog/**/*.mdx"

[build]
output = "dist"
minify = true
"#;

const DEFAULT_POST: &str = r#"---
title: Hello World
pubDate: 2023-01-01
description: The first post on this blog.
author: Gazette
---

# Hello World

This post was generated by `gazette init`. Edit it, or add more `.mdx`
files next to it, then run `gazette build`.

Every post needs a `title` and a publish date (`pubDate`, `date` or
`publishDate`) in its frontmatter.
"#;

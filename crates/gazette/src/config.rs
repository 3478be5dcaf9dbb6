//! Site configuration (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gazette_static::BuildConfig;
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub content: ContentSection,
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub description: String,
    /// Absolute site URL; the SITE environment variable takes precedence
    pub url: String,
    pub language: Option<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            url: String::new(),
            language: Some("en-us".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub dir: PathBuf,
    pub pattern: String,
}

impl Default for ContentSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/content"),
            pattern: "blog/**/*.mdx".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub output: PathBuf,
    pub minify: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            minify: true,
        }
    }
}

impl SiteConfig {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SiteConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Build settings with the site URL resolved.
    ///
    /// `site` is the `--site` flag or the SITE variable, which clap merges.
    pub fn to_build_config(&self, site: Option<String>) -> BuildConfig {
        let language = self
            .site
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        BuildConfig {
            content_dir: self.content.dir.clone(),
            pattern: self.content.pattern.clone(),
            output_dir: self.build.output.clone(),
            minify: self.build.minify,
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            site: site.unwrap_or_else(|| self.site.url.clone()),
            language,
        }
    }
}

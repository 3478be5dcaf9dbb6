//! A single unit of authored content.

use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// One content document: an identifier, its frontmatter, and its body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Path relative to the content root, `/`-separated (e.g. `blog/hello.mdx`)
    pub path: String,

    /// Parsed frontmatter
    pub frontmatter: Frontmatter,

    /// Body without the frontmatter block
    pub body: String,
}

impl ContentItem {
    /// Create an item from already-parsed parts.
    pub fn new(path: impl Into<String>, frontmatter: Frontmatter, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            frontmatter,
            body: body.into(),
        }
    }

    /// Parse an item from its source text.
    pub fn parse(path: impl Into<String>, source: &str) -> Result<Self, FrontmatterError> {
        let (frontmatter, body) = extract_frontmatter(source)?;
        Ok(Self::new(path, frontmatter, body))
    }

    /// The `title` field, trimmed. `None` when absent or blank.
    pub fn title(&self) -> Option<String> {
        self.frontmatter
            .get("title")
            .and_then(|t| t.to_text())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// URL slug: the `slug` field, or the path without extension and trailing `index`.
    pub fn slug(&self) -> String {
        if let Some(slug) = self.frontmatter.get_str("slug") {
            let slug = slug.trim_matches('/');
            if !slug.is_empty() {
                return slug.to_string();
            }
        }

        let stem = match self.path.rfind('.') {
            Some(dot) if !self.path[dot..].contains('/') => &self.path[..dot],
            _ => self.path.as_str(),
        };

        let stem = stem.trim_start_matches("./");
        let stem = if stem == "index" {
            ""
        } else {
            stem.strip_suffix("/index").unwrap_or(stem)
        };

        stem.trim_matches('/').to_string()
    }

    /// Site-relative route for this item: `/{slug}/`, or `/` for a root index.
    pub fn route(&self) -> String {
        let slug = self.slug();
        if slug.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", slug)
        }
    }
}

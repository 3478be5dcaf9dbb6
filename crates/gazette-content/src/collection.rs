//! Content collections: every file under a root that matches a pattern.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::frontmatter::FrontmatterError;
use crate::item::ContentItem;
use crate::pattern::{ContentPattern, PatternError};

/// A set of content files selected by a glob pattern under a root directory.
///
/// Files are visited in a stable order (sorted by file name within each
/// directory), so loading the same tree twice yields the same sequence.
#[derive(Debug, Clone)]
pub struct ContentCollection {
    root: PathBuf,
    pattern: ContentPattern,
}

impl ContentCollection {
    /// Create a collection rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, pattern: ContentPattern) -> Self {
        Self {
            root: root.into(),
            pattern,
        }
    }

    /// Create a collection from a glob string.
    pub fn with_glob(root: impl Into<PathBuf>, glob: &str) -> Result<Self, ContentError> {
        Ok(Self::new(root, ContentPattern::new(glob)?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pattern(&self) -> &ContentPattern {
        &self.pattern
    }

    /// Lazily enumerate matching items.
    ///
    /// Each file is read and parsed only when the iterator reaches it.
    pub fn items(
        &self,
    ) -> Result<impl Iterator<Item = Result<ContentItem, ContentError>> + '_, ContentError> {
        if !self.root.is_dir() {
            return Err(ContentError::RootNotFound(self.root.clone()));
        }

        let iter = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let relative = self.relative_path(entry.path())?;
                    if !self.pattern.is_match(&relative) {
                        return None;
                    }
                    Some(read_item(entry.path(), relative))
                }
                Err(err) => self.walk_error(err),
            });

        Ok(iter)
    }

    /// Load every matching item, failing on the first unreadable or malformed file.
    pub fn load(&self) -> Result<Vec<ContentItem>, ContentError> {
        let items = self.items()?.collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Loaded {} items matching '{}' from {}",
            items.len(),
            self.pattern.as_str(),
            self.root.display()
        );

        Ok(items)
    }

    /// A walk error on a path the pattern selects fails the load. Anything
    /// else (an unrelated unreadable directory, a symlink loop) is logged.
    fn walk_error(&self, err: walkdir::Error) -> Option<Result<ContentItem, ContentError>> {
        let path = err.path().map(Path::to_path_buf);
        let selected = path
            .as_deref()
            .and_then(|p| self.relative_path(p))
            .is_some_and(|relative| self.pattern.is_match(&relative));

        match path {
            Some(path) if selected => Some(Err(ContentError::Read {
                path,
                message: err.to_string(),
            })),
            Some(path) => {
                tracing::warn!("Skipping {}: {}", path.display(), err);
                None
            }
            None => {
                tracing::warn!("Skipping unreadable entry under {}: {}", self.root.display(), err);
                None
            }
        }
    }

    /// Path relative to the root, joined with `/`.
    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("/"))
    }
}

fn read_item(path: &Path, relative: String) -> Result<ContentItem, ContentError> {
    let source = fs::read_to_string(path).map_err(|e| ContentError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    ContentItem::parse(relative, &source).map_err(|source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur while loading a collection.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid frontmatter in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
}

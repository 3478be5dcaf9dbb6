//! Content collections for gazette.
//!
//! Loads authored documents (MDX or Markdown with YAML frontmatter) from a
//! directory, selecting files with a glob pattern such as `blog/**/*.mdx`.

pub mod collection;
pub mod frontmatter;
pub mod item;
pub mod pattern;

pub use collection::{ContentCollection, ContentError};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError, Scalar};
pub use item::ContentItem;
pub use pattern::{ContentPattern, PatternError};

//! RSS feed builder for gazette.
//!
//! Turns feed metadata and a content collection into a syndication document:
//!
//! ```ignore
//! let meta = FeedMetadata::new("Blog", "", "https://example.com")?;
//! let items = ContentCollection::with_glob("src/content", "blog/**/*.mdx")?.load()?;
//! let xml = gazette_feed::build(&meta, &items)?.to_rss()?;
//! ```
//!
//! Building is pure: no I/O, no state kept between calls.

pub mod builder;
pub mod date;
pub mod entry;
pub mod error;
pub mod metadata;

pub use builder::{build, FeedDocument, GENERATOR};
pub use date::parse_publish_date;
pub use entry::{FeedEntry, DATE_FIELDS};
pub use error::{ContentIssue, FeedError, IssueKind};
pub use metadata::{FeedMetadata, DEFAULT_LANGUAGE};

//! Static site generator for gazette.
//!
//! Builds the blog pages, the RSS feed, and the site assets from a content
//! collection.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder, FEED_FILE};

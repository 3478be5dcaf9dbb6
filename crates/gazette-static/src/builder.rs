//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use gazette_content::{ContentCollection, ContentError, ContentItem};
use gazette_feed::{FeedDocument, FeedEntry, FeedError, FeedMetadata};

use crate::assets::AssetPipeline;
use crate::templates::{PostContext, PostSummary, SiteContext, TemplateEngine};

/// File name of the feed, relative to the output root.
pub const FEED_FILE: &str = "feed.xml";

/// Route of the generated blog index.
pub const BLOG_INDEX_ROUTE: &str = "/blog/";

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content root directory
    pub content_dir: PathBuf,

    /// Glob selecting blog posts under the content root
    pub pattern: String,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Site and feed title
    pub title: String,

    /// Feed description
    pub description: String,

    /// Absolute site URL
    pub site: String,

    /// Language element of the feed and `lang` of pages
    pub language: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("src/content"),
            pattern: "blog/**/*.mdx".to_string(),
            output_dir: PathBuf::from("dist"),
            minify: true,
            title: "Blog".to_string(),
            description: String::new(),
            site: String::new(),
            language: Some(gazette_feed::DEFAULT_LANGUAGE.to_string()),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated (posts plus the blog index)
    pub pages: usize,

    /// Number of feed entries
    pub entries: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Path of the written feed
    pub feed_path: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A post to be rendered.
#[derive(Debug)]
struct PostPage<'a> {
    item: &'a ContentItem,
    entry: &'a FeedEntry,
    summary: PostSummary,
    output_path: PathBuf,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Feed metadata from the build configuration.
    pub fn feed_metadata(&self) -> Result<FeedMetadata, FeedError> {
        Ok(FeedMetadata::new(
            self.config.title.clone(),
            self.config.description.clone(),
            &self.config.site,
        )?
        .with_language(self.config.language.clone()))
    }

    /// Load the collection and build the feed without writing anything.
    pub fn build_feed(&self) -> Result<(Vec<ContentItem>, FeedDocument), BuildError> {
        let metadata = self.feed_metadata()?;

        let collection =
            ContentCollection::with_glob(&self.config.content_dir, &self.config.pattern)?;
        let items = collection.load()?;

        let feed = gazette_feed::build(&metadata, &items).inspect_err(|e| {
            for issue in e.issues() {
                tracing::error!("{}", issue);
            }
        })?;

        tracing::debug!("Built feed with {} entries", feed.len());

        Ok((items, feed))
    }

    /// Build the static site.
    ///
    /// The feed is built before anything is written, so invalid content
    /// aborts the build without touching the output directory. Blocking;
    /// async callers should run it on a blocking thread.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let (items, feed) = self.build_feed()?;
        let xml = feed.to_rss()?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let site = self.site_context(feed.metadata());
        let posts = self.plan_posts(&items, &feed, &site);

        // Render posts in parallel; order only matters for the index and feed
        let results: Vec<Result<(), BuildError>> = posts
            .par_iter()
            .map(|post| self.build_post(post, &site))
            .collect();

        for result in results {
            result?;
        }

        let mut pages = posts.len();
        if self.build_blog_index(&posts, &site)? {
            pages += 1;
        }

        let feed_path = self.config.output_dir.join(FEED_FILE);
        write_file(&feed_path, &xml)?;
        tracing::info!("Wrote feed with {} entries to {}", feed.len(), feed_path.display());

        self.generate_assets()?;

        Ok(BuildResult {
            pages,
            entries: feed.len(),
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
            feed_path,
        })
    }

    fn site_context(&self, metadata: &FeedMetadata) -> SiteContext {
        SiteContext {
            title: metadata.title().to_string(),
            base_url: metadata.site().path().to_string(),
            feed_path: FEED_FILE.to_string(),
            language: metadata
                .language()
                .unwrap_or(gazette_feed::DEFAULT_LANGUAGE)
                .to_string(),
        }
    }

    /// Pair every item with its feed entry and output location.
    fn plan_posts<'a>(
        &self,
        items: &'a [ContentItem],
        feed: &'a FeedDocument,
        site: &SiteContext,
    ) -> Vec<PostPage<'a>> {
        items
            .iter()
            .zip(feed.entries())
            .map(|(item, entry)| {
                let route = item.route();
                PostPage {
                    item,
                    entry,
                    summary: PostSummary {
                        title: entry.title.clone(),
                        path: format!("{}{}", site.base_url, route.trim_start_matches('/')),
                        date: entry.pub_date.format("%B %-d, %Y").to_string(),
                        date_iso: entry.pub_date.to_rfc3339(),
                        description: entry.description.clone(),
                    },
                    output_path: self.output_path(&route),
                }
            })
            .collect()
    }

    /// `/blog/hello/` -> `dist/blog/hello/index.html`
    fn output_path(&self, route: &str) -> PathBuf {
        let relative = route.trim_matches('/');
        if relative.is_empty() {
            self.config.output_dir.join("index.html")
        } else {
            self.config.output_dir.join(relative).join("index.html")
        }
    }

    /// Render a single post.
    fn build_post(&self, post: &PostPage<'_>, site: &SiteContext) -> Result<(), BuildError> {
        let context = PostContext {
            post: post.summary.clone(),
            content: render_markdown(&post.item.body),
            author: post.entry.author.clone(),
        };

        let html = self
            .templates
            .render_post(site, &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", post.item.path, e)))?;

        write_file(&post.output_path, &html)
    }

    /// Render the blog index unless a post already occupies its route.
    fn build_blog_index(
        &self,
        posts: &[PostPage<'_>],
        site: &SiteContext,
    ) -> Result<bool, BuildError> {
        let index_path = self.output_path(BLOG_INDEX_ROUTE);
        if posts.iter().any(|p| p.output_path == index_path) {
            tracing::warn!(
                "Skipping blog index: {} is provided by content",
                index_path.display()
            );
            return Ok(false);
        }

        let summaries: Vec<PostSummary> = posts.iter().map(|p| p.summary.clone()).collect();
        let html = self
            .templates
            .render_blog_index(site, &summaries)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;

        write_file(&index_path, &html)?;
        Ok(true)
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css
            })
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), &css)?;

        write_file(&assets_dir.join("script.js"), &AssetPipeline::generate_js())?;

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

/// Render a post body to HTML. Top-level MDX `import`/`export` lines are dropped.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let markdown = strip_mdx_esm(content);

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(&markdown, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

fn strip_mdx_esm(content: &str) -> String {
    let mut in_fence = false;
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                return true;
            }
            in_fence || !(line.starts_with("import ") || line.starts_with("export "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_post(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn config(root: &Path) -> BuildConfig {
        BuildConfig {
            content_dir: root.join("content"),
            output_dir: root.join("dist"),
            site: "https://example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_feed_and_pages() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        write_post(
            &content,
            "blog/first.mdx",
            "---\ntitle: First\npubDate: 2023-01-01\n---\nimport X from './x'\n\n# First post",
        );
        write_post(
            &content,
            "blog/second.mdx",
            "---\ntitle: Second\npubDate: 2023-02-01\n---\nSecond post",
        );

        let result = StaticBuilder::new(config(temp.path())).build().unwrap();

        assert_eq!(result.entries, 2);
        assert_eq!(result.pages, 3);

        let out = temp.path().join("dist");
        let feed = fs::read_to_string(out.join("feed.xml")).unwrap();
        let first = feed.find("https://example.com/blog/first/").unwrap();
        let second = feed.find("https://example.com/blog/second/").unwrap();
        assert!(first < second);
        assert!(feed.contains("<language>en-us</language>"));

        let page = fs::read_to_string(out.join("blog/first/index.html")).unwrap();
        assert!(page.contains("<h1>First post</h1>"));
        assert!(!page.contains("import X"));

        assert!(out.join("blog/index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/script.js").exists());
    }

    #[test]
    fn empty_collection_builds_empty_feed() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("content")).unwrap();

        let result = StaticBuilder::new(config(temp.path())).build().unwrap();

        assert_eq!(result.entries, 0);
        let feed = fs::read_to_string(result.feed_path).unwrap();
        assert!(feed.contains("<rss"));
    }

    #[test]
    fn invalid_content_aborts_without_output() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        write_post(&content, "blog/untitled.mdx", "---\npubDate: 2023-01-01\n---\n");

        let result = StaticBuilder::new(config(temp.path())).build();

        assert!(matches!(result, Err(BuildError::Feed(FeedError::Content(_)))));
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn relative_site_is_a_configuration_error() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("content")).unwrap();

        let builder = StaticBuilder::new(BuildConfig {
            site: "/blog".to_string(),
            ..config(temp.path())
        });

        assert!(matches!(
            builder.build(),
            Err(BuildError::Feed(FeedError::Configuration(_)))
        ));
    }

    #[test]
    fn site_sub_path_prefixes_page_links() {
        let temp = tempdir().unwrap();
        write_post(
            &temp.path().join("content"),
            "blog/hello.mdx",
            "---\ntitle: Hello\ndate: 2023-03-01\n---\nHi",
        );

        let builder = StaticBuilder::new(BuildConfig {
            site: "https://example.com/docs/".to_string(),
            ..config(temp.path())
        });
        builder.build().unwrap();

        let index = fs::read_to_string(temp.path().join("dist/blog/index.html")).unwrap();
        assert!(index.contains(r#"href="/docs/blog/hello/""#));
        assert!(index.contains(r#"href="/docs/assets/main.css""#));
    }

    #[test]
    fn slug_leaving_the_site_aborts_build() {
        let temp = tempdir().unwrap();
        write_post(
            &temp.path().join("content"),
            "blog/escape.mdx",
            "---\ntitle: Escape\ndate: 2023-03-01\nslug: ../../escaped\n---\nHi",
        );

        let result = StaticBuilder::new(BuildConfig {
            output_dir: temp.path().join("site/dist"),
            ..config(temp.path())
        })
        .build();

        assert!(matches!(result, Err(BuildError::Feed(FeedError::Content(_)))));
        assert!(!temp.path().join("escaped").exists());
        assert!(!temp.path().join("site").exists());
    }

    #[test]
    fn relative_link_keeps_feed_and_page_together() {
        let temp = tempdir().unwrap();
        write_post(
            &temp.path().join("content"),
            "blog/hello.mdx",
            "---\ntitle: Hello\ndate: 2023-03-01\nlink: /posts/hello/\n---\nHi",
        );

        StaticBuilder::new(config(temp.path())).build().unwrap();

        let feed = fs::read_to_string(temp.path().join("dist/feed.xml")).unwrap();
        assert!(feed.contains("<link>https://example.com/blog/hello/</link>"));
        assert!(!feed.contains("/posts/hello/"));
        assert!(temp.path().join("dist/blog/hello/index.html").exists());
    }

    #[test]
    fn colliding_routes_abort_build() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        write_post(&content, "blog/a.mdx", "---\ntitle: A\ndate: 2023-01-01\n---\nA");
        write_post(
            &content,
            "blog/a/index.mdx",
            "---\ntitle: Also A\ndate: 2023-02-01\n---\nAlso A",
        );

        let result = StaticBuilder::new(config(temp.path())).build();

        match result {
            Err(BuildError::Feed(err)) => {
                assert_eq!(err.issues().len(), 1);
                assert!(err.to_string().contains("route /blog/a/ is already used"));
            }
            other => panic!("expected a content error, got {:?}", other),
        }
        assert!(!temp.path().join("dist").exists());
    }

    #[test]
    fn strips_esm_outside_code_fences() {
        let source = "import A from 'a'\n\n```js\nimport B from 'b'\n```\nexport const c = 1";

        let stripped = strip_mdx_esm(source);

        assert!(!stripped.contains("import A"));
        assert!(stripped.contains("import B"));
        assert!(!stripped.contains("export const"));
    }
}

//! Feed entries derived from content items.

use chrono::{DateTime, FixedOffset};
use gazette_content::{ContentItem, Scalar};
use url::Url;

use crate::date::parse_publish_date;
use crate::error::{ContentIssue, IssueKind};
use crate::metadata::FeedMetadata;

/// Frontmatter keys checked for the publish date, in order.
pub const DATE_FIELDS: &[&str] = &["pubDate", "date", "publishDate"];

/// One item of a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    /// Absolute link to the item; also used as its guid
    pub link: Url,
    pub pub_date: DateTime<FixedOffset>,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Path of the content item this entry was built from
    pub source_path: String,
}

impl FeedEntry {
    /// Build an entry from a content item.
    ///
    /// Every problem with the item is reported, not just the first.
    pub fn from_item(item: &ContentItem, meta: &FeedMetadata) -> Result<Self, Vec<ContentIssue>> {
        let mut issues = Vec::new();
        let issue = |kind| ContentIssue {
            path: item.path.clone(),
            kind,
        };

        let title = item.title();
        if title.is_none() {
            issues.push(issue(IssueKind::MissingTitle));
        }

        let pub_date = match item.frontmatter.first_of(DATE_FIELDS) {
            None => {
                issues.push(issue(IssueKind::MissingDate));
                None
            }
            Some((field, value)) => {
                let parsed = value.as_str().and_then(parse_publish_date);
                if parsed.is_none() {
                    issues.push(issue(IssueKind::InvalidDate {
                        field: field.to_string(),
                        value: value.to_string(),
                    }));
                }
                parsed
            }
        };

        // The route is also where the page is written, so it is checked even
        // when an absolute `link` replaces it in the feed.
        let route = item.route();
        let link = if !is_contained_route(&route) {
            issues.push(issue(IssueKind::InvalidLink(route)));
            None
        } else {
            match resolve_link(item, meta, &route) {
                Ok(link) => Some(link),
                Err(raw) => {
                    issues.push(issue(IssueKind::InvalidLink(raw)));
                    None
                }
            }
        };

        match (title, pub_date, link) {
            (Some(title), Some(pub_date), Some(link)) => Ok(Self {
                title,
                link,
                pub_date,
                description: text_field(item, "description"),
                author: text_field(item, "author"),
                source_path: item.path.clone(),
            }),
            _ => Err(issues),
        }
    }

    /// Convert to an RSS item.
    pub fn to_rss_item(&self) -> rss::Item {
        rss::ItemBuilder::default()
            .title(Some(self.title.clone()))
            .link(Some(self.link.to_string()))
            .guid(Some(
                rss::GuidBuilder::default()
                    .permalink(true)
                    .value(self.link.to_string())
                    .build(),
            ))
            .pub_date(Some(self.pub_date.to_rfc2822()))
            .description(self.description.clone())
            .author(self.author.clone())
            .build()
    }
}

/// Absolute link for an item: an absolute http(s) `link` field, or its route
/// under the site. A relative `link` is ignored.
fn resolve_link(item: &ContentItem, meta: &FeedMetadata, route: &str) -> Result<Url, String> {
    let absolute = item
        .frontmatter
        .get_str("link")
        .and_then(|link| Url::parse(link.trim()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some());

    match absolute {
        Some(url) => Ok(url),
        None => meta.resolve(route).map_err(|_| route.to_string()),
    }
}

/// Whether every segment of `route` stays beneath the site root.
///
/// Rejects empty, `.` and `..` segments (including their percent-encoded
/// forms, which URL joining also resolves), backslashes, and anything that
/// would start a query or fragment.
fn is_contained_route(route: &str) -> bool {
    let inner = route.trim_matches('/');
    if inner.is_empty() {
        return true;
    }

    inner.split('/').all(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        !segment.is_empty()
            && decoded != "."
            && decoded != ".."
            && !segment.contains(['\\', '?', '#'])
    })
}

fn text_field(item: &ContentItem, key: &str) -> Option<String> {
    item.frontmatter
        .get(key)
        .and_then(Scalar::to_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazette_content::Frontmatter;
    use pretty_assertions::assert_eq;

    fn meta() -> FeedMetadata {
        FeedMetadata::new("Blog", "", "https://example.com").unwrap()
    }

    fn item(path: &str, fields: &[(&str, &str)]) -> ContentItem {
        let mut fm = Frontmatter::new();
        for (key, value) in fields {
            fm.insert(*key, *value);
        }
        ContentItem::new(path, fm, "")
    }

    #[test]
    fn builds_entry_from_frontmatter() {
        let item = item(
            "blog/hello.mdx",
            &[
                ("title", "Hello"),
                ("pubDate", "2023-01-01"),
                ("description", "First post"),
            ],
        );

        let entry = FeedEntry::from_item(&item, &meta()).unwrap();

        assert_eq!(entry.title, "Hello");
        assert_eq!(entry.link.as_str(), "https://example.com/blog/hello/");
        assert_eq!(entry.description.as_deref(), Some("First post"));
        assert_eq!(entry.author, None);
        assert_eq!(entry.source_path, "blog/hello.mdx");
    }

    #[test]
    fn falls_back_to_date_field() {
        let item = item("blog/a.mdx", &[("title", "A"), ("date", "2023-02-01")]);

        let entry = FeedEntry::from_item(&item, &meta()).unwrap();

        assert_eq!(entry.pub_date.to_rfc3339(), "2023-02-01T00:00:00+00:00");
    }

    #[test]
    fn keeps_absolute_links() {
        let item = item(
            "blog/a.mdx",
            &[
                ("title", "A"),
                ("date", "2023-02-01"),
                ("link", "https://elsewhere.dev/post"),
            ],
        );

        let entry = FeedEntry::from_item(&item, &meta()).unwrap();

        assert_eq!(entry.link.as_str(), "https://elsewhere.dev/post");
    }

    #[test]
    fn relative_link_falls_back_to_route() {
        let item = item(
            "blog/hello.mdx",
            &[
                ("title", "Hello"),
                ("date", "2023-02-01"),
                ("link", "/posts/hello/"),
            ],
        );

        let entry = FeedEntry::from_item(&item, &meta()).unwrap();

        assert_eq!(entry.link.as_str(), "https://example.com/blog/hello/");
    }

    #[test]
    fn rejects_slugs_leaving_the_site() {
        for slug in ["../../escaped", "blog/%2e%2e/%2E%2E/x", "a//b", "a\\..\\b", "a?b"] {
            let item = item(
                "blog/a.mdx",
                &[("title", "A"), ("date", "2023-02-01"), ("slug", slug)],
            );

            let issues = FeedEntry::from_item(&item, &meta()).unwrap_err();

            assert_eq!(issues.len(), 1, "slug {:?}", slug);
            assert!(
                matches!(issues[0].kind, IssueKind::InvalidLink(_)),
                "slug {:?}",
                slug
            );
        }
    }

    #[test]
    fn absolute_link_does_not_hide_an_unsafe_route() {
        let item = item(
            "blog/a.mdx",
            &[
                ("title", "A"),
                ("date", "2023-02-01"),
                ("slug", "../outside"),
                ("link", "https://elsewhere.dev/post"),
            ],
        );

        let issues = FeedEntry::from_item(&item, &meta()).unwrap_err();

        assert_eq!(issues[0].kind, IssueKind::InvalidLink("/../outside/".to_string()));
    }

    #[test]
    fn sub_path_site_keeps_prefix() {
        let meta = FeedMetadata::new("Docs", "", "https://example.com/docs/").unwrap();
        let item = item(
            "blog/a.mdx",
            &[("title", "A"), ("date", "2023-02-01"), ("slug", "news/a")],
        );

        let entry = FeedEntry::from_item(&item, &meta).unwrap();

        assert_eq!(entry.link.as_str(), "https://example.com/docs/news/a/");
    }

    #[test]
    fn reports_all_missing_fields() {
        let item = item("blog/empty.mdx", &[]);

        let issues = FeedEntry::from_item(&item, &meta()).unwrap_err();

        assert_eq!(
            issues,
            vec![
                ContentIssue {
                    path: "blog/empty.mdx".to_string(),
                    kind: IssueKind::MissingTitle,
                },
                ContentIssue {
                    path: "blog/empty.mdx".to_string(),
                    kind: IssueKind::MissingDate,
                },
            ]
        );
    }

    #[test]
    fn reports_unparsable_dates() {
        let mut fm = Frontmatter::new();
        fm.insert("title", "Numbers");
        fm.insert("date", Scalar::Int(2023));
        let item = ContentItem::new("blog/n.mdx", fm, "");

        let issues = FeedEntry::from_item(&item, &meta()).unwrap_err();

        assert_eq!(
            issues[0].kind,
            IssueKind::InvalidDate {
                field: "date".to_string(),
                value: "2023".to_string(),
            }
        );
    }

    #[test]
    fn converts_to_rss_item() {
        let item = item(
            "blog/hello.mdx",
            &[
                ("title", "Hello"),
                ("pubDate", "2023-01-01"),
                ("author", "team@rome.tools (Rome)"),
            ],
        );

        let rss_item = FeedEntry::from_item(&item, &meta()).unwrap().to_rss_item();

        assert_eq!(rss_item.title(), Some("Hello"));
        assert_eq!(rss_item.link(), Some("https://example.com/blog/hello/"));
        let pub_date = DateTime::parse_from_rfc2822(rss_item.pub_date().unwrap()).unwrap();
        assert_eq!(pub_date.to_rfc3339(), "2023-01-01T00:00:00+00:00");
        assert_eq!(rss_item.author(), Some("team@rome.tools (Rome)"));
        assert_eq!(
            rss_item.guid().map(|g| g.value()),
            Some("https://example.com/blog/hello/")
        );
    }
}

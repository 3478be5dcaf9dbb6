//! Feed building and RSS serialization.

use std::collections::HashMap;

use gazette_content::ContentItem;
use rss::validation::Validate;
use rss::ChannelBuilder;

use crate::entry::FeedEntry;
use crate::error::{ContentIssue, FeedError, IssueKind};
use crate::metadata::FeedMetadata;

/// Generator name written to the channel.
pub const GENERATOR: &str = "gazette";

/// A built feed: metadata plus one entry per content item, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedDocument {
    metadata: FeedMetadata,
    entries: Vec<FeedEntry>,
}

impl FeedDocument {
    pub fn metadata(&self) -> &FeedMetadata {
        &self.metadata
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as an RSS 2.0 document.
    pub fn to_rss(&self) -> Result<String, FeedError> {
        let items: Vec<rss::Item> = self.entries.iter().map(FeedEntry::to_rss_item).collect();

        let channel = ChannelBuilder::default()
            .title(self.metadata.title())
            .link(self.metadata.site().as_str())
            .description(self.metadata.description())
            .language(self.metadata.language().map(str::to_string))
            .generator(Some(GENERATOR.to_string()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| FeedError::Render(format!("RSS validation failed: {}", e)))?;

        Ok(channel.to_string())
    }
}

/// Build a feed from metadata and a content collection.
///
/// Produces exactly one entry per item, in the order the items are yielded.
/// If any item lacks a title or a usable date, or shares its route or link
/// with an earlier item, no document is produced and every offending item is
/// reported in [`FeedError::Content`].
pub fn build<'a, I>(metadata: &FeedMetadata, items: I) -> Result<FeedDocument, FeedError>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let mut entries = Vec::new();
    let mut issues = Vec::new();

    // route or link -> path of the first item claiming it
    let mut routes: HashMap<String, String> = HashMap::new();
    let mut links: HashMap<String, String> = HashMap::new();

    for item in items {
        let entry = match FeedEntry::from_item(item, metadata) {
            Ok(entry) => entry,
            Err(item_issues) => {
                issues.extend(item_issues);
                continue;
            }
        };

        let route = item.route();
        let link = entry.link.to_string();

        let duplicate = if let Some(first) = routes.get(&route) {
            Some(IssueKind::DuplicateRoute {
                route,
                first: first.clone(),
            })
        } else if let Some(first) = links.get(&link) {
            Some(IssueKind::DuplicateLink {
                link,
                first: first.clone(),
            })
        } else {
            routes.insert(route, item.path.clone());
            links.insert(link, item.path.clone());
            None
        };

        match duplicate {
            Some(kind) => issues.push(ContentIssue {
                path: item.path.clone(),
                kind,
            }),
            None => entries.push(entry),
        }
    }

    if !issues.is_empty() {
        return Err(FeedError::Content(issues));
    }

    Ok(FeedDocument {
        metadata: metadata.clone(),
        entries,
    })
}

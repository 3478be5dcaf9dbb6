//! Feed build errors.

use std::fmt;

/// Errors that can occur when building or rendering a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Feed metadata is unusable (missing title, relative or missing site URL).
    #[error("Invalid feed configuration: {0}")]
    Configuration(String),

    /// One or more content items cannot form a valid entry.
    #[error("{} content item(s) cannot be added to the feed:\n{}", .0.len(), format_issues(.0))]
    Content(Vec<ContentIssue>),

    /// The feed could not be serialized.
    #[error("Failed to render feed: {0}")]
    Render(String),
}

impl FeedError {
    /// Content issues carried by this error, if any.
    pub fn issues(&self) -> &[ContentIssue] {
        match self {
            Self::Content(issues) => issues,
            _ => &[],
        }
    }
}

/// A problem with a single content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIssue {
    /// Item path relative to the content root
    pub path: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    MissingTitle,
    MissingDate,
    /// Date field present but unparsable (field name, raw value)
    InvalidDate { field: String, value: String },
    /// Route or link cannot be resolved beneath the site URL
    InvalidLink(String),
    /// Another item already renders to this route
    DuplicateRoute { route: String, first: String },
    /// Another item already uses this link as its guid
    DuplicateLink { link: String, first: String },
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingTitle => write!(f, "{}: missing required field 'title'", self.path),
            IssueKind::MissingDate => write!(
                f,
                "{}: missing required field 'pubDate' (or 'date')",
                self.path
            ),
            IssueKind::InvalidDate { field, value } => {
                write!(f, "{}: invalid date in '{}': {:?}", self.path, field, value)
            }
            IssueKind::InvalidLink(link) => write!(f, "{}: invalid link {:?}", self.path, link),
            IssueKind::DuplicateRoute { route, first } => {
                write!(f, "{}: route {} is already used by {}", self.path, route, first)
            }
            IssueKind::DuplicateLink { link, first } => {
                write!(f, "{}: link {} is already used by {}", self.path, link, first)
            }
        }
    }
}

fn format_issues(issues: &[ContentIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}

//! Channel-level feed metadata.

use url::Url;

use crate::error::FeedError;

/// Language element emitted when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Title, description, and site URL of a feed.
///
/// The site URL is validated on construction: feed readers resolve nothing,
/// so every link in the document must be absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMetadata {
    title: String,
    description: String,
    site: Url,
    language: Option<String>,
}

impl FeedMetadata {
    /// Create metadata, validating the title and site URL.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        site: &str,
    ) -> Result<Self, FeedError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(FeedError::Configuration("feed title is empty".to_string()));
        }

        Ok(Self {
            title,
            description: description.into(),
            site: parse_site(site)?,
            language: Some(DEFAULT_LANGUAGE.to_string()),
        })
    }

    /// Override the language element. `None` omits it.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Site URL, always ending in `/`.
    pub fn site(&self) -> &Url {
        &self.site
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Resolve a site-relative route (e.g. `/blog/hello/`) to an absolute URL.
    ///
    /// Routes resolve beneath the site path, so a site of
    /// `https://example.com/docs/` keeps its `/docs/` prefix.
    pub fn resolve(&self, route: &str) -> Result<Url, url::ParseError> {
        self.site.join(route.trim_start_matches('/'))
    }
}

fn parse_site(site: &str) -> Result<Url, FeedError> {
    let site = site.trim();
    if site.is_empty() {
        return Err(FeedError::Configuration(
            "site URL is missing; set SITE or [site].url".to_string(),
        ));
    }

    let mut url = Url::parse(site).map_err(|e| {
        FeedError::Configuration(format!(
            "site URL {:?} is not an absolute URL: {}",
            site, e
        ))
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(FeedError::Configuration(format!(
            "site URL {:?} must be an absolute http(s) URL",
            site
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_site() {
        let meta = FeedMetadata::new("Blog", "", "https://example.com").unwrap();

        assert_eq!(meta.site().as_str(), "https://example.com/");
        assert_eq!(meta.language(), Some(DEFAULT_LANGUAGE));
        assert_eq!(meta.description(), "");
    }

    #[test]
    fn rejects_relative_site() {
        for site in ["/blog", "example.com", "blog/feed.xml"] {
            let result = FeedMetadata::new("Blog", "", site);
            assert!(
                matches!(result, Err(FeedError::Configuration(_))),
                "{} should be rejected",
                site
            );
        }
    }

    #[test]
    fn rejects_missing_site_and_title() {
        assert!(matches!(
            FeedMetadata::new("Blog", "", "  "),
            Err(FeedError::Configuration(_))
        ));
        assert!(matches!(
            FeedMetadata::new(" ", "", "https://example.com"),
            Err(FeedError::Configuration(_))
        ));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            FeedMetadata::new("Blog", "", "mailto:team@example.com"),
            Err(FeedError::Configuration(_))
        ));
        assert!(matches!(
            FeedMetadata::new("Blog", "", "file:///var/www"),
            Err(FeedError::Configuration(_))
        ));
    }

    #[test]
    fn resolves_routes_beneath_site_path() {
        let meta = FeedMetadata::new("Docs", "", "https://example.com/docs").unwrap();

        assert_eq!(meta.site().as_str(), "https://example.com/docs/");
        assert_eq!(
            meta.resolve("/blog/hello/").unwrap().as_str(),
            "https://example.com/docs/blog/hello/"
        );
    }

    #[test]
    fn language_can_be_overridden_or_dropped() {
        let meta = FeedMetadata::new("Blog", "", "https://example.com").unwrap();

        let fr = meta.clone().with_language(Some("fr-fr".to_string()));
        assert_eq!(fr.language(), Some("fr-fr"));

        let none = meta.with_language(None);
        assert_eq!(none.language(), None);
    }
}

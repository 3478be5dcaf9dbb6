//! Template engine for rendering blog pages.

use minijinja::{context, Environment};

/// A post summary shown on the blog index.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PostSummary {
    /// Post title
    pub title: String,
    /// Site-relative URL path
    pub path: String,
    /// Human readable publish date
    pub date: String,
    /// Machine readable publish date (RFC 3339)
    pub date_iso: String,
    /// Optional description
    pub description: Option<String>,
}

/// Site-wide values shared by every page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SiteContext {
    /// Site title
    pub title: String,
    /// Base URL path for assets and links
    pub base_url: String,
    /// Path of the feed relative to the base URL
    pub feed_path: String,
    /// `lang` attribute of the document
    pub language: String,
}

/// Context for rendering a post page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PostContext {
    pub post: PostSummary,
    /// Rendered body HTML
    pub content: String,
    pub author: Option<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("post.html", POST_TEMPLATE),
            ("blog.html", BLOG_TEMPLATE),
        ] {
            env.add_template(name, source).expect("Failed to add built-in template");
        }

        Self { env }
    }

    /// Render a single post.
    pub fn render_post(
        &self,
        site: &SiteContext,
        post: &PostContext,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("post.html")?;

        tmpl.render(context! {
            site => site,
            title => &post.post.title,
            post => &post.post,
            content => &post.content,
            author => &post.author,
        })
    }

    /// Render the blog index listing every post.
    pub fn render_blog_index(
        &self,
        site: &SiteContext,
        posts: &[PostSummary],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("blog.html")?;

        tmpl.render(context! {
            site => site,
            title => "Blog",
            posts => posts,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ site.language }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site.title }}</title>
  <link rel="alternate" type="application/rss+xml" title="{{ site.title }}" href="{{ site.base_url }}{{ site.feed_path }}">
  <link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
</head>
<body>
  <header class="page-header">
    <a href="{{ site.base_url }}" class="logo">{{ site.title }}</a>
    <button class="mobile-handle" aria-label="Menu">&#9776;</button>
    <nav>
      <a href="{{ site.base_url }}blog/">Blog</a>
      <a href="{{ site.base_url }}{{ site.feed_path }}">RSS</a>
    </nav>
    <button class="color-scheme-switch" role="switch" aria-checked="false">Theme</button>
  </header>
  <main class="content">
    {% block content %}{% endblock %}
  </main>
  <script src="{{ site.base_url }}assets/script.js"></script>
</body>
</html>"##;

const POST_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="post">
  <h1>{{ post.title }}</h1>
  <p class="post-meta">
    <time datetime="{{ post.date_iso }}">{{ post.date }}</time>
    {% if author %}&middot; {{ author }}{% endif %}
  </p>
  {{ content | safe }}
</article>
{% endblock %}"##;

const BLOG_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<h1>Blog</h1>
{% if posts %}
<ul class="post-list">
{% for post in posts %}
  <li>
    <a href="{{ post.path }}">{{ post.title }}</a>
    <time datetime="{{ post.date_iso }}">{{ post.date }}</time>
    {% if post.description %}<p>{{ post.description }}</p>{% endif %}
  </li>
{% endfor %}
</ul>
{% else %}
<p>No posts yet.</p>
{% endif %}
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteContext {
        SiteContext {
            title: "Rome".to_string(),
            base_url: "/".to_string(),
            feed_path: "feed.xml".to_string(),
            language: "en-us".to_string(),
        }
    }

    fn summary(title: &str) -> PostSummary {
        PostSummary {
            title: title.to_string(),
            path: "/blog/hello/".to_string(),
            date: "January 1, 2023".to_string(),
            date_iso: "2023-01-01T00:00:00+00:00".to_string(),
            description: Some("An introduction".to_string()),
        }
    }

    #[test]
    fn renders_post_page() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_post(
                &site(),
                &PostContext {
                    post: summary("Hello"),
                    content: "<p>Hello world</p>".to_string(),
                    author: Some("Rome Team".to_string()),
                },
            )
            .unwrap();

        assert!(html.contains("<title>Hello - Rome</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains("Rome Team"));
        assert!(html.contains(r#"href="/feed.xml""#));
        assert!(html.contains(r#"<html lang="en-us">"#));
    }

    #[test]
    fn renders_blog_index() {
        let engine = TemplateEngine::new();

        let html = engine
            .render_blog_index(&site(), &[summary("First"), summary("Second")])
            .unwrap();

        assert!(html.contains("First"));
        assert!(html.contains("Second"));
        assert!(html.contains("An introduction"));
    }

    #[test]
    fn renders_empty_blog_index() {
        let engine = TemplateEngine::new();

        let html = engine.render_blog_index(&site(), &[]).unwrap();

        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn escapes_post_titles() {
        let engine = TemplateEngine::new();

        let html = engine.render_blog_index(&site(), &[summary("<script>")]).unwrap();

        assert!(!html.contains("<a href=\"/blog/hello/\"><script>"));
    }
}

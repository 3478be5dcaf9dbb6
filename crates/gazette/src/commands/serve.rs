//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use gazette_static::StaticBuilder;
use tower_http::services::ServeDir;

use crate::config::SiteConfig;

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    port: u16,
    dir: Option<PathBuf>,
    site: Option<String>,
) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let dir = dir.unwrap_or_else(|| config.build.output.clone());

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'gazette build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let base = base_path(&config, site);
    tracing::info!("Serving {} at http://{}{}", dir.display(), addr, base);

    let app = router(&dir, &base);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let url = format!("http://{}{}", addr, base);
    if let Err(e) = open::that(&url) {
        tracing::debug!("Could not open browser: {}", e);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Path the site is deployed under, e.g. `/docs/` for `https://example.com/docs`.
///
/// Pages link to assets beneath it, so the preview has to serve there too.
fn base_path(config: &SiteConfig, site: Option<String>) -> String {
    match StaticBuilder::new(config.to_build_config(site)).feed_metadata() {
        Ok(metadata) => metadata.site().path().to_string(),
        Err(e) => {
            tracing::debug!("Serving at /: {}", e);
            "/".to_string()
        }
    }
}

/// Serve `dir` at `base`; a sub-path site also redirects `/` to its root.
fn router(dir: &Path, base: &str) -> Router {
    let files = ServeDir::new(dir);

    let mount = base.trim_end_matches('/');
    if mount.is_empty() {
        return Router::new().fallback_service(files);
    }

    let home = base.to_string();
    Router::new()
        .route("/", get(move || async move { Redirect::temporary(&home) }))
        .nest_service(mount, files)
}

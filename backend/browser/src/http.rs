//! HTTP page loader.
//!
//! Fetches the page markup with the viewport's user agent, then every
//! stylesheet the markup links to and every sheet those `@import`.
//! Scripts are not executed.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use a11yforge_page::{linked_stylesheet_urls, parse_stylesheet, SourceHtml};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::loader::{LoadedPage, PageLoader, PAGE_UNREACHABLE};
use crate::viewport::ViewportSettings;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, user_agent: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))
    }

    async fn fetch_stylesheet(&self, url: &str, user_agent: &str) -> Result<String> {
        let response = self.get(url, user_agent).await?;
        let status = response.status();
        if !status.is_success() {
            bail!("Stylesheet {url} responded with {status}");
        }
        response.text().await.context("Failed to read stylesheet body")
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    fn name(&self) -> &str {
        "http"
    }

    async fn load(&self, url: &str, viewport: &ViewportSettings) -> Result<LoadedPage> {
        let response = self
            .get(url, &viewport.user_agent)
            .await
            .context(PAGE_UNREACHABLE)?;
        let status = response.status();
        if !status.is_success() {
            bail!("{PAGE_UNREACHABLE} {url} responded with {status}");
        }
        let final_url = response.url().to_string();
        let html = response.text().await.context(PAGE_UNREACHABLE)?;

        let mut stylesheets = Vec::new();
        let mut pending: VecDeque<String> = stylesheet_links(&html, &final_url).into();
        let mut seen: HashSet<String> = pending.iter().cloned().collect();
        while let Some(href) = pending.pop_front() {
            match self.fetch_stylesheet(&href, &viewport.user_agent).await {
                Ok(content) => {
                    for import in imported_urls(&href, &content) {
                        if seen.insert(import.clone()) {
                            pending.push_back(import);
                        }
                    }
                    stylesheets.push((href, content));
                }
                Err(e) => warn!(stylesheet = %href, error = %e, "Skipping stylesheet"),
            }
        }

        info!(
            url = %final_url,
            status = status.as_u16(),
            html_length = html.len(),
            stylesheets = stylesheets.len(),
            "Page loaded"
        );
        Ok(LoadedPage {
            url: final_url,
            status: status.as_u16(),
            html,
            stylesheets,
        })
    }
}

/// Linked stylesheet URLs. The parsed document is not `Send`, so it is
/// confined to this synchronous helper.
fn stylesheet_links(html: &str, base_url: &str) -> Vec<String> {
    let source = SourceHtml::parse(html);
    let links = linked_stylesheet_urls(source.document(), base_url);
    debug!(base_url, links = links.len(), "Discovered linked stylesheets");
    links
}

/// `@import` targets of a fetched stylesheet, resolved against its URL.
fn imported_urls(sheet_url: &str, css: &str) -> Vec<String> {
    let Ok(base) = Url::parse(sheet_url) else {
        return Vec::new();
    };
    parse_stylesheet(sheet_url, css)
        .imports()
        .filter_map(|href| match base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!(stylesheet = sheet_url, href, error = %e, "Skipping unresolvable @import");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/",
                get(|| async {
                    r#"<html><head>
                         <link rel="stylesheet" href="/main.css">
                         <link rel="stylesheet" href="/missing.css">
                       </head><body><p>Hi</p></body></html>"#
                }),
            )
            .route("/main.css", get(|| async { "p { color: red }" }))
            .route("/missing.css", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/imports",
                get(|| async {
                    r#"<html><head>
                         <link rel="stylesheet" href="/css/site.css">
                         <link rel="stylesheet" href="/css/theme.css">
                       </head><body><p>Hi</p></body></html>"#
                }),
            )
            .route(
                "/css/site.css",
                get(|| async { "@import url(\"theme.css\"); @import 'print.css' print; p { margin: 0 }" }),
            )
            .route("/css/theme.css", get(|| async { "@import '/css/site.css'; p { color: blue }" }))
            .route("/css/print.css", get(|| async { "p { display: none }" }))
            .route("/gone", get(|| async { StatusCode::GONE }))
            .route(
                "/agent",
                get(|headers: axum::http::HeaderMap| async move {
                    headers
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            )
    }

    #[tokio::test]
    async fn test_loads_page_and_stylesheets() {
        let base = serve(router()).await;
        let loader = HttpPageLoader::new(DEFAULT_TIMEOUT).unwrap();
        let page = loader
            .load(&format!("{base}/"), &ViewportSettings::default())
            .await
            .unwrap();
        assert_eq!(page.status, 200);
        assert!(page.html.contains("<p>Hi</p>"));
        assert_eq!(page.stylesheets.len(), 1);
        assert_eq!(page.stylesheets[0].0, format!("{base}/main.css"));
        assert_eq!(page.stylesheets[0].1, "p { color: red }");
    }

    #[tokio::test]
    async fn test_follows_imported_stylesheets_once() {
        let base = serve(router()).await;
        let loader = HttpPageLoader::new(DEFAULT_TIMEOUT).unwrap();
        let page = loader
            .load(&format!("{base}/imports"), &ViewportSettings::default())
            .await
            .unwrap();
        let files: Vec<&str> = page.stylesheets.iter().map(|(file, _)| file.as_str()).collect();
        assert_eq!(
            files,
            vec![
                format!("{base}/css/site.css"),
                format!("{base}/css/theme.css"),
                format!("{base}/css/print.css"),
            ]
        );
        assert_eq!(page.stylesheets[2].1, "p { display: none }");
    }

    #[test]
    fn test_imported_urls_resolve_against_sheet() {
        let urls = imported_urls(
            "https://example.com/css/a.css",
            "@import 'b.css'; @import url(/root.css); p { color: red }",
        );
        assert_eq!(
            urls,
            vec!["https://example.com/css/b.css", "https://example.com/root.css"]
        );
    }

    #[tokio::test]
    async fn test_error_status_fails() {
        let base = serve(router()).await;
        let loader = HttpPageLoader::new(DEFAULT_TIMEOUT).unwrap();
        let err = loader
            .load(&format!("{base}/gone"), &ViewportSettings::default())
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with(PAGE_UNREACHABLE));
    }

    #[tokio::test]
    async fn test_sends_viewport_user_agent() {
        let base = serve(router()).await;
        let loader = HttpPageLoader::new(DEFAULT_TIMEOUT).unwrap();
        let viewport = ViewportSettings {
            user_agent: "a11yforge-test".to_string(),
            ..Default::default()
        };
        let page = loader.load(&format!("{base}/agent"), &viewport).await.unwrap();
        assert_eq!(page.html, "a11yforge-test");
    }
}

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::loader::{LoadedPage, PageLoader, PAGE_UNREACHABLE};
use crate::viewport::ViewportSettings;

/// Serves pages from memory.
#[derive(Debug, Default, Clone)]
pub struct StaticPageLoader {
    pages: HashMap<String, LoadedPage>,
}

impl StaticPageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page without external stylesheets.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html, Vec::new());
        self
    }

    pub fn insert(
        &mut self,
        url: impl Into<String>,
        html: impl Into<String>,
        stylesheets: Vec<(String, String)>,
    ) {
        let url = url.into();
        self.pages.insert(
            url.clone(),
            LoadedPage {
                url,
                status: 200,
                html: html.into(),
                stylesheets,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl PageLoader for StaticPageLoader {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self, url: &str, _viewport: &ViewportSettings) -> Result<LoadedPage> {
        debug!(url, "Serving page from memory");
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("{PAGE_UNREACHABLE} No page registered for {url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let mut loader = StaticPageLoader::new().with_page("https://a.test/", "<p>a</p>");
        loader.insert(
            "https://b.test/",
            "<p>b</p>",
            vec![("https://b.test/s.css".to_string(), "p{}".to_string())],
        );
        assert_eq!(loader.len(), 2);

        let viewport = ViewportSettings::default();
        let page = loader.load("https://b.test/", &viewport).await.unwrap();
        assert_eq!(page.html, "<p>b</p>");
        assert_eq!(page.stylesheets.len(), 1);

        let err = loader.load("https://c.test/", &viewport).await.unwrap_err();
        assert!(err.to_string().contains("https://c.test/"));
    }
}

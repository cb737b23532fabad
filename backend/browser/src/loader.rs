use anyhow::Result;
use async_trait::async_trait;

use crate::viewport::ViewportSettings;

/// Message of the error returned when a page can't be loaded.
pub const PAGE_UNREACHABLE: &str = "Error trying to reach webpage.";

/// A page as delivered by a loader, before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub html: String,
    /// External stylesheets keyed by URL, in discovery order
    pub stylesheets: Vec<(String, String)>,
}

/// Source of page markup and stylesheets.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Human-readable name of this loader.
    fn name(&self) -> &str;

    /// Load a page as seen with the given viewport.
    async fn load(&self, url: &str, viewport: &ViewportSettings) -> Result<LoadedPage>;

    /// Release any resources held by the loader.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

//! `a11yforge crawl`: list the pages of a site without evaluating them.

use std::sync::Arc;
use std::time::Duration;

use a11yforge_browser::{HttpPageLoader, PageLoader, ViewportSettings, DEFAULT_TIMEOUT};
use a11yforge_config::A11yForgeConfig;
use a11yforge_crawler::Crawler;
use anyhow::Result;
use clap::Args;

use crate::config::Overrides;
use crate::terminal_output::note_success;

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Start URL
    pub url: String,

    /// Link depth below the start page
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Stop after this many URLs
    #[arg(short = 'n', long)]
    pub max_urls: Option<usize>,

    /// Pages fetched at once
    #[arg(short = 'p', long)]
    pub max_parallel: Option<usize>,

    /// Give up after this many seconds, keeping what was found
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl CrawlArgs {
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::default();
        overrides.set_opt(&["crawler", "maxDepth"], self.max_depth);
        overrides.set_opt(&["crawler", "maxUrls"], self.max_urls);
        overrides.set_opt(&["crawler", "maxParallelCrawls"], self.max_parallel);
        overrides.set_opt(&["crawler", "timeoutSecs"], self.timeout);
        overrides
    }
}

pub async fn run(args: CrawlArgs, config: A11yForgeConfig) -> Result<()> {
    let timeout = config
        .browser
        .as_ref()
        .and_then(|browser| browser.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    let loader: Arc<dyn PageLoader> = Arc::new(HttpPageLoader::new(timeout)?);
    let viewport = ViewportSettings::resolve(config.viewport_options().as_ref());

    let crawler = Crawler::new(&args.url, config.crawl_options(), Arc::clone(&loader))?
        .with_viewport(viewport);
    let urls = crawler.crawl().await;
    loader.close().await?;
    let urls = urls?;

    for url in &urls {
        println!("{url}");
    }
    note_success(&format!("Found {} URL(s)", urls.len()));
    Ok(())
}

//! Breadth-first crawler that discovers the pages of one site.

mod links;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use a11yforge_browser::{PageLoader, ViewportSettings};
use a11yforge_core::CrawlOptions;
use anyhow::{bail, Context, Result};
use tokio::task::{Id, JoinSet};
use tracing::{debug, error, info, warn};
use url::Url;

pub use links::{extract_links, is_crawlable};

/// Discovers same-site URLs starting from one page.
pub struct Crawler {
    start: Url,
    options: CrawlOptions,
    loader: Arc<dyn PageLoader>,
    viewport: ViewportSettings,
}

/// URLs found so far; survives a timed-out crawl.
#[derive(Debug, Default)]
struct CrawlState {
    seen: HashSet<String>,
    found: Vec<String>,
}

impl CrawlState {
    /// Record a URL; `false` when it was already known.
    fn discover(&mut self, url: &str) -> bool {
        if self.seen.insert(url.to_string()) {
            self.found.push(url.to_string());
            true
        } else {
            false
        }
    }
}

impl Crawler {
    pub fn new(start_url: &str, options: CrawlOptions, loader: Arc<dyn PageLoader>) -> Result<Self> {
        let mut start = Url::parse(start_url.trim()).with_context(|| format!("Invalid crawl URL: {start_url}"))?;
        if !matches!(start.scheme(), "http" | "https") {
            bail!("Crawl URL must use http or https: {start_url}");
        }
        if options.max_parallel_crawls == 0 {
            bail!("max_parallel_crawls must be at least 1");
        }
        start.set_fragment(None);
        Ok(Self {
            start,
            options,
            loader,
            viewport: ViewportSettings::default(),
        })
    }

    pub fn with_viewport(mut self, viewport: ViewportSettings) -> Self {
        self.viewport = viewport;
        self
    }

    /// Crawl the site and return every URL found, in discovery order.
    pub async fn crawl(&self) -> Result<Vec<String>> {
        let started = Instant::now();
        let mut state = CrawlState::default();

        match self.options.timeout_secs {
            Some(secs) => {
                let limit = Duration::from_secs(secs);
                if tokio::time::timeout(limit, self.run(&mut state)).await.is_err() {
                    warn!(start = %self.start, timeout_secs = secs, "Crawl timed out");
                }
            }
            None => self.run(&mut state).await,
        }

        info!(
            start = %self.start,
            urls = state.found.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Crawl finished"
        );
        Ok(state.found)
    }

    fn limit_reached(&self, state: &CrawlState) -> bool {
        self.options
            .max_urls
            .is_some_and(|max| state.found.len() >= max)
    }

    async fn run(&self, state: &mut CrawlState) {
        state.discover(self.start.as_str());
        let mut frontier = vec![self.start.to_string()];

        for depth in 0..self.options.max_depth {
            if frontier.is_empty() || self.limit_reached(state) {
                break;
            }
            debug!(depth, pages = frontier.len(), "Crawling level");
            let mut next = Vec::new();

            for chunk in frontier.chunks(self.options.max_parallel_crawls) {
                for links in self.fetch_all(chunk).await {
                    for link in links {
                        if self.limit_reached(state) {
                            return;
                        }
                        if state.discover(&link) {
                            next.push(link);
                        }
                    }
                }
            }
            frontier = next;
        }
    }

    /// Fetch pages concurrently; returns the crawlable links of each, in input order.
    async fn fetch_all(&self, urls: &[String]) -> Vec<Vec<String>> {
        let mut join_set = JoinSet::new();
        let mut tasks: HashMap<Id, (usize, &str)> = HashMap::new();
        for (index, url) in urls.iter().enumerate() {
            let loader = Arc::clone(&self.loader);
            let viewport = self.viewport.clone();
            let task_url = url.clone();
            let handle = join_set.spawn(async move { loader.load(&task_url, &viewport).await });
            tasks.insert(handle.id(), (index, url.as_str()));
        }

        let mut pages = vec![Vec::new(); urls.len()];
        while let Some(joined) = join_set.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => {
                    let url = tasks.get(&e.id()).map_or("", |(_, url)| *url);
                    error!(url = %url, error = %e, "Crawl task panicked");
                    continue;
                }
            };
            let Some(&(index, url)) = tasks.get(&id) else {
                continue;
            };
            match result {
                Ok(page) => {
                    let base = Url::parse(&page.url).unwrap_or_else(|_| self.start.clone());
                    pages[index] = extract_links(&page.html, &base)
                        .into_iter()
                        .filter(|link| is_crawlable(link, &self.start))
                        .map(String::from)
                        .collect();
                }
                Err(e) => warn!(url = %url, error = %e, "Failed to fetch page while crawling"),
            }
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yforge_browser::{HttpPageLoader, StaticPageLoader, DEFAULT_TIMEOUT};
    use axum::extract::Path;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;

    /// A virtual site where every page links to `CHILD_LINKS` unique deeper pages.
    const CHILD_LINKS: u32 = 3;
    const SITE_DEPTH: usize = 10;

    fn site_page(path: Option<String>) -> Html<String> {
        let segments: Vec<String> = path
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let offset: u32 = segments.iter().filter_map(|s| s.parse::<u32>().ok()).sum();
        let prefix = if segments.is_empty() {
            String::new()
        } else {
            format!("/{}", segments.join("/"))
        };
        let parent = if segments.is_empty() {
            String::new()
        } else {
            format!(r#"<div><a href="/{}">Parent</a></div>"#, segments[..segments.len() - 1].join("/"))
        };
        let children = if segments.len() < SITE_DEPTH {
            (0..CHILD_LINKS)
                .map(|i| format!(r#"<li><a href="{prefix}/{}">Child #{i}</a></li>"#, i + offset))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            "<li>Max depth reached</li>".to_string()
        };
        Html(format!(
            r#"<html><head></head><body>
                 <div><a href="/">Front page</a></div>
                 {parent}
                 <div><ul>{children}</ul></div>
               </body></html>"#
        ))
    }

    async fn mock_site() -> String {
        let router = Router::new()
            .route("/", get(|| async { site_page(None) }))
            .route("/*path", get(|Path(path): Path<String>| async move { site_page(Some(path)) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn http_loader() -> Arc<dyn PageLoader> {
        Arc::new(HttpPageLoader::new(DEFAULT_TIMEOUT).unwrap())
    }

    #[tokio::test]
    async fn test_depth_one_finds_direct_children() {
        let base = mock_site().await;
        let options = CrawlOptions {
            max_depth: 1,
            ..Default::default()
        };
        let urls = Crawler::new(&base, options, http_loader()).unwrap().crawl().await.unwrap();
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[0], base);
        assert_eq!(urls[1], format!("{base}0"));
    }

    #[tokio::test]
    async fn test_depth_two_follows_unique_paths() {
        let base = mock_site().await;
        let options = CrawlOptions {
            max_depth: 2,
            max_parallel_crawls: 2,
            ..Default::default()
        };
        let urls = Crawler::new(&base, options, http_loader()).unwrap().crawl().await.unwrap();
        assert_eq!(urls.len(), 1 + 3 + 9);
        assert!(urls.contains(&format!("{base}1/3")));
    }

    #[tokio::test]
    async fn test_max_urls_stops_crawl() {
        let base = mock_site().await;
        let options = CrawlOptions {
            max_depth: 3,
            max_urls: Some(5),
            ..Default::default()
        };
        let urls = Crawler::new(&base, options, http_loader()).unwrap().crawl().await.unwrap();
        assert_eq!(urls.len(), 5);
    }

    #[tokio::test]
    async fn test_depth_zero_and_fetch_failures() {
        let loader: Arc<dyn PageLoader> = Arc::new(
            StaticPageLoader::new().with_page("https://site.test/", r#"<a href="/missing">x</a>"#),
        );
        let options = CrawlOptions {
            max_depth: 0,
            ..Default::default()
        };
        let urls = Crawler::new("https://site.test/", options, Arc::clone(&loader))
            .unwrap()
            .crawl()
            .await
            .unwrap();
        assert_eq!(urls, vec!["https://site.test/"]);

        // The missing page is discovered but can't be expanded.
        let options = CrawlOptions {
            max_depth: 3,
            ..Default::default()
        };
        let urls = Crawler::new("https://site.test/", options, loader).unwrap().crawl().await.unwrap();
        assert_eq!(urls, vec!["https://site.test/", "https://site.test/missing"]);
    }

    /// Answers `/` and `/b` at once and panics on `/crash`. Other pages
    /// stall when `stall` is set.
    struct SlowLoader {
        site: StaticPageLoader,
        stall: bool,
    }

    impl SlowLoader {
        fn new(stall: bool) -> Self {
            let site = StaticPageLoader::new()
                .with_page(
                    "https://site.test/",
                    r#"<a href="/a">A</a><a href="/crash">Crash</a><a href="/b">B</a>"#,
                )
                .with_page("https://site.test/b", r#"<a href="/b/1">B1</a>"#);
            Self { site, stall }
        }
    }

    #[async_trait::async_trait]
    impl PageLoader for SlowLoader {
        fn name(&self) -> &str {
            "slow"
        }

        async fn load(&self, url: &str, viewport: &ViewportSettings) -> Result<a11yforge_browser::LoadedPage> {
            match url {
                "https://site.test/" | "https://site.test/b" => self.site.load(url, viewport).await,
                "https://site.test/crash" => panic!("loader crashed on {url}"),
                _ => {
                    if self.stall {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                    self.site.load(url, viewport).await
                }
            }
        }
    }

    #[tokio::test]
    async fn test_timeout_keeps_urls_found_so_far() {
        let options = CrawlOptions {
            max_depth: 3,
            timeout_secs: Some(1),
            ..Default::default()
        };
        let started = Instant::now();
        let urls = Crawler::new("https://site.test/", options, Arc::new(SlowLoader::new(true)))
            .unwrap()
            .crawl()
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            urls,
            vec![
                "https://site.test/",
                "https://site.test/a",
                "https://site.test/crash",
                "https://site.test/b",
            ]
        );
    }

    #[tokio::test]
    async fn test_panicked_fetch_does_not_stop_level() {
        let options = CrawlOptions {
            max_depth: 2,
            max_parallel_crawls: 3,
            ..Default::default()
        };
        let urls = Crawler::new("https://site.test/", options, Arc::new(SlowLoader::new(false)))
            .unwrap()
            .crawl()
            .await
            .unwrap();
        assert_eq!(
            urls,
            vec![
                "https://site.test/",
                "https://site.test/a",
                "https://site.test/crash",
                "https://site.test/b",
                "https://site.test/b/1",
            ]
        );
    }

    #[test]
    fn test_rejects_invalid_start() {
        let loader: Arc<dyn PageLoader> = Arc::new(StaticPageLoader::new());
        assert!(Crawler::new("not a url", CrawlOptions::default(), Arc::clone(&loader)).is_err());
        assert!(Crawler::new("ftp://site.test/", CrawlOptions::default(), loader).is_err());
    }
}

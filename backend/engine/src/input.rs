//! Turns the input options into the list of pages to evaluate.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use a11yforge_browser::{PageLoader, ViewportSettings};
use a11yforge_core::{A11yError, EvaluationOptions, CUSTOM_HTML_URL};
use a11yforge_crawler::Crawler;
use anyhow::Context;
use logging::{EvaluationEvent, EventLogger};
use tracing::{debug, warn};

/// URLs in input order: `url`, `urls`, the file, the crawl, then raw HTML.
/// Duplicates keep their first position.
pub async fn resolve_urls(
    options: &EvaluationOptions,
    loader: &Arc<dyn PageLoader>,
) -> Result<Vec<String>, A11yError> {
    let mut urls: Vec<String> = options
        .url
        .iter()
        .chain(options.urls.iter())
        .map(|url| decode_url(url))
        .collect();

    if let Some(file) = &options.file {
        urls.extend(read_url_file(Path::new(file)).await?);
    }

    if let Some(start) = &options.crawl {
        let viewport = ViewportSettings::resolve(options.viewport.as_ref());
        let crawler = Crawler::new(start, options.crawl_options.clone(), Arc::clone(loader))
            .map_err(|e| A11yError::Crawl(format!("{e:#}")))?
            .with_viewport(viewport);
        let found = crawler
            .crawl()
            .await
            .map_err(|e| A11yError::Crawl(format!("{e:#}")))?;
        EventLogger::log_event(EvaluationEvent::CrawlFinished {
            start_url: start.clone(),
            urls: found.len(),
        });
        urls.extend(found);
    }

    if options.html.is_some() {
        urls.push(CUSTOM_HTML_URL.to_string());
    }

    let mut seen = HashSet::new();
    urls.retain(|url| !url.is_empty() && seen.insert(url.clone()));
    debug!(count = urls.len(), "Resolved input URLs");
    Ok(urls)
}

/// Percent-decode and trim; undecodable input is kept as written.
fn decode_url(url: &str) -> String {
    match urlencoding::decode(url) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(e) => {
            warn!(url = %url, error = %e, "URL is not valid percent-encoding");
            url.trim().to_string()
        }
    }
}

/// One URL per non-empty line.
async fn read_url_file(path: &Path) -> Result<Vec<String>, A11yError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read URL file: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yforge_browser::StaticPageLoader;

    fn loader() -> Arc<dyn PageLoader> {
        let site = StaticPageLoader::new()
            .with_page(
                "https://site.test/",
                r#"<a href="/a">A</a><a href="/b#top">B</a><a href="https://other.test/">X</a>"#,
            )
            .with_page("https://site.test/a", "<p>a</p>")
            .with_page("https://site.test/b", "<p>b</p>");
        Arc::new(site)
    }

    #[tokio::test]
    async fn test_collects_urls_in_input_order() {
        let path = std::env::temp_dir().join(format!("a11yforge-urls-{}.txt", std::process::id()));
        std::fs::write(&path, "https://site.test/file\n\n   https://site.test/%20spaced  \n").unwrap();

        let options = EvaluationOptions {
            url: Some("https%3A%2F%2Fsite.test%2Fsearch%3Fq%3Da11y ".to_string()),
            urls: vec![
                "https://site.test/b".to_string(),
                "https://site.test/file".to_string(),
            ],
            file: Some(path.display().to_string()),
            html: Some("<p>raw</p>".to_string()),
            ..Default::default()
        };
        let urls = resolve_urls(&options, &loader()).await.unwrap();
        let _ = std::fs::remove_file(path);

        assert_eq!(
            urls,
            vec![
                "https://site.test/search?q=a11y",
                "https://site.test/b",
                "https://site.test/file",
                "https://site.test/%20spaced",
                CUSTOM_HTML_URL,
            ]
        );
    }

    #[tokio::test]
    async fn test_crawl_results_are_appended() {
        let options = EvaluationOptions {
            crawl: Some("https://site.test/".to_string()),
            ..Default::default()
        };
        let urls = resolve_urls(&options, &loader()).await.unwrap();
        assert_eq!(
            urls,
            vec!["https://site.test/", "https://site.test/a", "https://site.test/b"]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let options = EvaluationOptions {
            file: Some("/nonexistent/a11yforge/urls.txt".to_string()),
            ..Default::default()
        };
        assert!(resolve_urls(&options, &loader()).await.is_err());
    }
}

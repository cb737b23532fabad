//! HTML source parsing and stylesheet discovery.

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

/// The page markup as fetched, plus its parsed document.
pub struct SourceHtml {
    plain: String,
    document: Html,
    element_count: usize,
    title: Option<String>,
}

impl SourceHtml {
    /// Parse page markup. Parsing never fails; malformed markup is recovered
    /// the way browsers recover it.
    pub fn parse(plain: &str) -> Self {
        let plain = plain.trim().to_string();
        let document = Html::parse_document(&plain);

        let element_count = elements(&document).count();
        let title = elements(&document)
            .find(|el| el.value().name() == "title")
            .map(|el| el.text().collect::<String>())
            .filter(|text| !text.is_empty());

        debug!(element_count, title = ?title, "Parsed source HTML");

        Self {
            plain,
            document,
            element_count,
            title,
        }
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// All elements of a document in tree order.
pub(crate) fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// Collect the contents of every `<style>` element, keyed `html{k}`.
///
/// `k` counts all `<style>` elements, so an empty one still consumes an index.
pub fn inline_stylesheets(document: &Html) -> Vec<(String, String)> {
    elements(document)
        .filter(|el| el.value().name() == "style")
        .enumerate()
        .filter_map(|(k, el)| {
            let content: String = el.text().collect();
            (!content.is_empty()).then(|| (format!("html{k}"), content))
        })
        .collect()
}

/// Absolute URLs of every `<link rel="stylesheet">` in the document.
pub fn linked_stylesheet_urls(document: &Html, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    elements(document)
        .filter(|el| el.value().name() == "link")
        .filter(|el| {
            el.value()
                .attr("rel")
                .map(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("stylesheet")))
                .unwrap_or(false)
        })
        .filter_map(|el| el.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| match &base {
            Some(base) => base.join(href).ok(),
            None => Url::parse(href).ok(),
        })
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Front page</title>
            <link rel="stylesheet" href="/css/main.css">
            <link rel="alternate stylesheet" href="https://cdn.example.net/alt.css">
            <link rel="icon" href="/favicon.ico">
            <style>body { color: red; }</style>
            <style></style>
            <style>p { margin: 0; }</style>
          </head>
          <body><p>Hello</p></body>
        </html>
    "#;

    #[test]
    fn test_parse_counts_elements_and_title() {
        let source = SourceHtml::parse(PAGE);
        assert_eq!(source.title(), Some("Front page"));
        // html, head, title, 3 links, 3 styles, body, p
        assert_eq!(source.element_count(), 11);
        assert!(source.plain().starts_with("<html>"));
    }

    #[test]
    fn test_empty_title_is_none() {
        let source = SourceHtml::parse("<html><head><title></title></head></html>");
        assert_eq!(source.title(), None);
    }

    #[test]
    fn test_inline_stylesheets_keep_indices() {
        let source = SourceHtml::parse(PAGE);
        let sheets = inline_stylesheets(source.document());
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].0, "html0");
        assert_eq!(sheets[1].0, "html2");
        assert_eq!(sheets[1].1, "p { margin: 0; }");
    }

    #[test]
    fn test_linked_stylesheets_resolved() {
        let source = SourceHtml::parse(PAGE);
        let urls = linked_stylesheet_urls(source.document(), "https://example.com/docs/index.html");
        assert_eq!(
            urls,
            vec![
                "https://example.com/css/main.css".to_string(),
                "https://cdn.example.net/alt.css".to_string(),
            ]
        );
    }

    #[test]
    fn test_linked_stylesheets_without_base_keep_absolute_only() {
        let source = SourceHtml::parse(PAGE);
        let urls = linked_stylesheet_urls(source.document(), "customHtml");
        assert_eq!(urls, vec!["https://cdn.example.net/alt.css".to_string()]);
    }
}

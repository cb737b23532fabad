use a11yforge_core::{DomInfo, ViewportInfo};
use ego_tree::NodeId;
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::element::Element;
use crate::source::{elements, SourceHtml};
use crate::style_map::StyleMap;
use crate::stylesheet::ParsedStylesheet;

/// Everything the rules get to see of one page.
pub struct Page {
    url: String,
    source: SourceHtml,
    stylesheets: Vec<ParsedStylesheet>,
    styles: StyleMap,
    viewport: ViewportInfo,
}

impl Page {
    /// Build the page snapshot, mapping the stylesheets onto the document.
    pub fn new(
        url: impl Into<String>,
        source: SourceHtml,
        stylesheets: Vec<ParsedStylesheet>,
        viewport: ViewportInfo,
    ) -> Self {
        let styles = StyleMap::build(source.document(), &stylesheets);
        Self {
            url: url.into(),
            source,
            stylesheets,
            styles,
            viewport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> &SourceHtml {
        &self.source
    }

    pub fn stylesheets(&self) -> &[ParsedStylesheet] {
        &self.stylesheets
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn viewport(&self) -> &ViewportInfo {
        &self.viewport
    }

    pub fn dom_info(&self) -> DomInfo {
        DomInfo {
            title: self.source.title().map(str::to_string),
            element_count: self.source.element_count(),
            html_length: self.source.plain().len(),
            stylesheet_count: self.stylesheets.len(),
        }
    }

    /// Elements matching a CSS selector, in document order.
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, selector: &str) -> Vec<Element<'_>> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(selector, error = ?e, "Invalid selector");
                return Vec::new();
            }
        };
        self.source
            .document()
            .select(&parsed)
            .map(|el| Element::new(el, &self.styles))
            .collect()
    }

    pub fn element(&self, node: NodeId) -> Option<Element<'_>> {
        self.source
            .document()
            .tree
            .get(node)
            .and_then(ElementRef::wrap)
            .map(|el| Element::new(el, &self.styles))
    }

    /// Every element of the document, in tree order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        elements(self.source.document()).map(|el| Element::new(el, &self.styles))
    }

    /// The first element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<Element<'_>> {
        self.elements().find(|el| el.attribute("id") == Some(id))
    }

    pub fn root(&self) -> Element<'_> {
        Element::new(self.source.document().root_element(), &self.styles)
    }

    pub fn body(&self) -> Option<Element<'_>> {
        self.root().children().into_iter().find(|el| el.tag_name() == "body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> Page {
        Page::new("https://example.com/", SourceHtml::parse(html), Vec::new(), ViewportInfo::default())
    }

    #[test]
    fn test_select_and_lookup() {
        let page = page(r#"<html><body><a id="x" href="/">Home</a><a href="/b">B</a></body></html>"#);
        assert_eq!(page.select("a[href]").len(), 2);
        assert!(page.select("a[").is_empty());
        let link = page.element_by_id("x").unwrap();
        assert_eq!(page.element(link.id()).unwrap().text(), "Home");
        assert_eq!(page.root().tag_name(), "html");
        assert_eq!(page.body().unwrap().children().len(), 2);
    }

    #[test]
    fn test_dom_info() {
        let page = page("<html><head><title>T</title></head><body></body></html>");
        let info = page.dom_info();
        assert_eq!(info.title.as_deref(), Some("T"));
        assert_eq!(info.element_count, 4);
        assert_eq!(info.stylesheet_count, 0);
    }
}

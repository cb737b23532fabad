use std::collections::BTreeMap;

use a11yforge_core::ElementReport;
use ego_tree::NodeId;
use scraper::ElementRef;

use crate::style_map::{MappedDeclaration, StyleMap};

/// Maximum length of the `html_code` recorded in reports.
const MAX_HTML_CODE_LEN: usize = 4096;

/// An element of the page together with its mapped styles.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
    styles: &'a StyleMap,
}

impl<'a> Element<'a> {
    pub fn new(inner: ElementRef<'a>, styles: &'a StyleMap) -> Self {
        Self { inner, styles }
    }

    pub fn id(&self) -> NodeId {
        self.inner.id()
    }

    pub fn element_ref(&self) -> ElementRef<'a> {
        self.inner
    }

    /// Lowercase local name.
    pub fn tag_name(&self) -> &'a str {
        self.inner.value().name()
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Attribute value, trimmed, `None` when missing or blank.
    pub fn non_empty_attribute(&self, name: &str) -> Option<&'a str> {
        self.attribute(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        self.inner.text().collect()
    }

    /// Descendant text with runs of whitespace collapsed.
    pub fn normalized_text(&self) -> String {
        self.text().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn has_children(&self) -> bool {
        self.inner.children().any(|child| child.value().is_element())
    }

    pub fn children(&self) -> Vec<Element<'a>> {
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(|child| Element::new(child, self.styles))
            .collect()
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.inner
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| Element::new(parent, self.styles))
    }

    /// Ancestors from the parent up to the root element.
    pub fn ancestors(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let styles = self.styles;
        self.inner
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(move |el| Element::new(el, styles))
    }

    /// Descendant elements (excluding this one) with the given tag name.
    pub fn descendants_named(&self, name: &str) -> Vec<Element<'a>> {
        let own = self.id();
        self.inner
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.id() != own && el.value().name() == name)
            .map(|el| Element::new(el, self.styles))
            .collect()
    }

    pub fn css_property(&self, property: &str) -> Option<&'a MappedDeclaration> {
        self.styles.property(self.id(), property)
    }

    pub fn css(&self) -> Option<&'a BTreeMap<String, MappedDeclaration>> {
        self.styles.get(self.id())
    }

    /// Unique CSS path from the root element, e.g. `html > body > div:nth-of-type(2)`.
    pub fn pointer(&self) -> String {
        let mut parts = Vec::new();
        let mut current = Some(self.inner);
        while let Some(el) = current {
            let name = el.value().name();
            let parent = el.parent().and_then(ElementRef::wrap);
            let part = match parent {
                Some(parent) => {
                    let siblings: Vec<_> = parent
                        .children()
                        .filter_map(ElementRef::wrap)
                        .filter(|sibling| sibling.value().name() == name)
                        .collect();
                    if siblings.len() > 1 {
                        let index = siblings
                            .iter()
                            .position(|sibling| sibling.id() == el.id())
                            .map_or(1, |i| i + 1);
                        format!("{name}:nth-of-type({index})")
                    } else {
                        name.to_string()
                    }
                }
                None => name.to_string(),
            };
            parts.push(part);
            current = parent;
        }
        parts.reverse();
        parts.join(" > ")
    }

    /// Outer HTML, truncated for reports.
    pub fn html_code(&self) -> String {
        let mut html = self.inner.html();
        if html.len() > MAX_HTML_CODE_LEN {
            let mut end = MAX_HTML_CODE_LEN;
            while !html.is_char_boundary(end) {
                end -= 1;
            }
            html.truncate(end);
        }
        html
    }

    pub fn to_report(&self) -> ElementReport {
        ElementReport {
            pointer: self.pointer(),
            html_code: self.html_code(),
            accessible_name: None,
        }
    }
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .field("pointer", &self.pointer())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::source::SourceHtml;
    use crate::stylesheet::parse_stylesheet;
    use a11yforge_core::ViewportInfo;

    fn page() -> Page {
        let html = r#"<html><body>
            <div id="a"><p>One</p><p class="x">Two <b>bold</b></p></div>
            <div id="b">  spaced
               text </div>
        </body></html>"#;
        let sheet = parse_stylesheet("html0", ".x { color: red }");
        Page::new("https://example.com/", SourceHtml::parse(html), vec![sheet], ViewportInfo::default())
    }

    #[test]
    fn test_pointer_uses_nth_of_type_for_repeated_siblings() {
        let page = page();
        let second = page.select("p.x")[0];
        assert_eq!(second.pointer(), "html > body > div:nth-of-type(1) > p:nth-of-type(2)");
        let body = page.select("body")[0];
        assert_eq!(body.pointer(), "html > body");
    }

    #[test]
    fn test_text_and_children() {
        let page = page();
        let div = page.select("#a")[0];
        assert_eq!(div.text(), "OneTwo bold");
        assert!(div.has_children());
        assert_eq!(div.children().len(), 2);
        assert_eq!(div.descendants_named("b").len(), 1);
        assert_eq!(page.select("#b")[0].normalized_text(), "spaced text");
    }

    #[test]
    fn test_css_property_lookup() {
        let page = page();
        let el = page.select("p.x")[0];
        assert_eq!(el.css_property("color").unwrap().value, "red");
        assert!(page.select("#a")[0].css().is_none());
    }

    #[test]
    fn test_report_contains_outer_html() {
        let page = page();
        let report = page.select("p.x")[0].to_report();
        assert_eq!(report.html_code, r#"<p class="x">Two <b>bold</b></p>"#);
        assert_eq!(report.pointer, "html > body > div:nth-of-type(1) > p:nth-of-type(2)");
    }

    #[test]
    fn test_parent_and_ancestors() {
        let page = page();
        let p = page.select("p.x")[0];
        assert_eq!(p.parent().unwrap().attribute("id"), Some("a"));
        let names: Vec<_> = p.ancestors().map(|a| a.tag_name()).collect();
        assert_eq!(names, vec!["div", "body", "html"]);
    }
}

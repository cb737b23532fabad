//! CSS-to-DOM mapping.
//!
//! One pass over every stylesheet: each style rule's selectors are matched
//! against the document and the rule's declarations are recorded on every
//! matched element. There is no specificity cascade. Later declarations
//! replace earlier ones for the same property unless the stored value is
//! `!important`, in which case the stored value is kept.

use std::collections::{BTreeMap, HashMap};

use ego_tree::NodeId;
use scraper::{Html, Selector};
use tracing::debug;

use crate::stylesheet::{CssRule, Declaration, ParsedStylesheet};

/// A declaration as it applies to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedDeclaration {
    /// Raw value, including `!important` when present
    pub value: String,
    /// Media query of the enclosing `@media` rule, if any
    pub media: Option<String>,
}

impl MappedDeclaration {
    pub fn is_important(&self) -> bool {
        self.value.contains("!important")
    }

    /// The value without the `!important` flag.
    pub fn specified(&self) -> &str {
        self.value
            .split("!important")
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Declarations applying to each element, keyed by node.
#[derive(Debug, Default)]
pub struct StyleMap {
    styles: HashMap<NodeId, BTreeMap<String, MappedDeclaration>>,
}

impl StyleMap {
    /// Map every stylesheet onto the document, in order.
    pub fn build(document: &Html, stylesheets: &[ParsedStylesheet]) -> Self {
        let mut map = Self::default();
        for stylesheet in stylesheets {
            if stylesheet.plain.trim().is_empty() {
                continue;
            }
            for rule in &stylesheet.rules {
                map.apply_rule(document, rule, None);
            }
        }
        debug!(
            stylesheets = stylesheets.len(),
            styled_elements = map.styles.len(),
            "Mapped CSS onto DOM"
        );
        map
    }

    fn apply_rule(&mut self, document: &Html, rule: &CssRule, media: Option<&str>) {
        match rule {
            CssRule::Style {
                selectors,
                declarations,
            }
            | CssRule::Page {
                selectors,
                declarations,
            } => self.apply_declarations(document, selectors, declarations, media),
            CssRule::Media { media, rules } => {
                for nested in rules {
                    self.apply_rule(document, nested, Some(media));
                }
            }
            // Other group rules start without a media context
            CssRule::Supports { rules, .. } | CssRule::Group { rules, .. } => {
                for nested in rules {
                    self.apply_rule(document, nested, None);
                }
            }
            // No selectors to match
            CssRule::FontFace { .. } => {}
            CssRule::Keyframes { .. } | CssRule::Import { .. } | CssRule::Other { .. } => {}
        }
    }

    fn apply_declarations(
        &mut self,
        document: &Html,
        selectors: &[String],
        declarations: &[Declaration],
        media: Option<&str>,
    ) {
        if declarations.is_empty() || selectors.is_empty() {
            return;
        }
        let selector_text = selectors.join(",");
        if selector_text.contains("@-ms-viewport") || selector_text == ":focus" {
            return;
        }

        for text in selectors {
            let selector = match Selector::parse(text) {
                Ok(selector) => selector,
                Err(e) => {
                    debug!(selector = %text, error = ?e, "Skipping unsupported selector");
                    continue;
                }
            };
            for element in document.select(&selector) {
                for declaration in declarations {
                    self.apply_declaration(element.id(), declaration, media);
                }
            }
        }
    }

    fn apply_declaration(&mut self, node: NodeId, declaration: &Declaration, media: Option<&str>) {
        if declaration.property.is_empty() || declaration.value.is_empty() {
            return;
        }
        let styles = self.styles.entry(node).or_default();
        if styles
            .get(&declaration.property)
            .is_some_and(MappedDeclaration::is_important)
        {
            return;
        }
        styles.insert(
            declaration.property.clone(),
            MappedDeclaration {
                value: declaration.value.clone(),
                media: media.map(str::to_string),
            },
        );
    }

    /// All declarations applying to a node.
    pub fn get(&self, node: NodeId) -> Option<&BTreeMap<String, MappedDeclaration>> {
        self.styles.get(&node)
    }

    pub fn property(&self, node: NodeId, property: &str) -> Option<&MappedDeclaration> {
        self.styles.get(&node)?.get(property)
    }

    /// Number of elements with at least one declaration.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::parse_stylesheet;
    use scraper::ElementRef;

    const PAGE: &str = r#"<html><body>
        <p id="intro" class="lead">Intro</p>
        <p id="second">Second</p>
        <div id="box"><span id="inner">x</span></div>
    </body></html>"#;

    fn node(document: &Html, id: &str) -> NodeId {
        document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(id))
            .map(|el| el.id())
            .unwrap()
    }

    fn build(sheets: &[(&str, &str)]) -> (Html, StyleMap) {
        let document = Html::parse_document(PAGE);
        let parsed: Vec<_> = sheets
            .iter()
            .map(|(file, css)| parse_stylesheet(file, css))
            .collect();
        let map = StyleMap::build(&document, &parsed);
        (document, map)
    }

    #[test]
    fn test_declarations_are_mapped_to_matching_elements() {
        let (document, map) = build(&[("a.css", "p { color: red } .lead { font-size: 2em }")]);
        let intro = node(&document, "intro");
        let second = node(&document, "second");
        assert_eq!(map.property(intro, "color").unwrap().value, "red");
        assert_eq!(map.property(intro, "font-size").unwrap().value, "2em");
        assert_eq!(map.property(second, "color").unwrap().value, "red");
        assert!(map.property(second, "font-size").is_none());
        assert!(map.get(node(&document, "box")).is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_later_declaration_replaces_earlier() {
        let (document, map) = build(&[("a.css", "p { color: red }"), ("html0", "#intro { color: blue }")]);
        assert_eq!(map.property(node(&document, "intro"), "color").unwrap().value, "blue");
        assert_eq!(map.property(node(&document, "second"), "color").unwrap().value, "red");
    }

    #[test]
    fn test_important_is_not_overwritten() {
        let (document, map) = build(&[(
            "a.css",
            "#intro { color: red !important } p { color: blue } #intro { color: green }",
        )]);
        let color = map.property(node(&document, "intro"), "color").unwrap();
        assert_eq!(color.value, "red !important");
        assert!(color.is_important());
        assert_eq!(color.specified(), "red");
    }

    #[test]
    fn test_media_context_is_recorded() {
        let (document, map) = build(&[(
            "a.css",
            "@media print { #box { display: none } } @supports (x: y) { @media (orientation: portrait) { #inner { transform: rotate(90deg) } } }",
        )]);
        let display = map.property(node(&document, "box"), "display").unwrap();
        assert_eq!(display.media.as_deref(), Some("print"));
        let transform = map.property(node(&document, "inner"), "transform").unwrap();
        assert_eq!(transform.media.as_deref(), Some("(orientation: portrait)"));
    }

    #[test]
    fn test_supports_inside_media_resets_media() {
        let (document, map) = build(&[(
            "a.css",
            "@media (orientation: portrait) { @supports (display: grid) { #intro { transform: rotate(90deg) } } }",
        )]);
        let transform = map.property(node(&document, "intro"), "transform").unwrap();
        assert_eq!(transform.value, "rotate(90deg)");
        assert!(transform.media.is_none());
    }

    #[test]
    fn test_skipped_selectors() {
        let (document, map) = build(&[(
            "a.css",
            ":focus { outline: none } p::before { content: 'x' } p, #box { margin: 0 } @font-face { font-family: X }",
        )]);
        let intro = node(&document, "intro");
        assert!(map.property(intro, "outline").is_none());
        assert!(map.property(intro, "content").is_none());
        assert_eq!(map.property(intro, "margin").unwrap().value, "0");
        assert_eq!(map.property(node(&document, "box"), "margin").unwrap().value, "0");
        assert!(map.property(intro, "font-family").is_none());
    }

    #[test]
    fn test_empty_stylesheet_is_ignored() {
        let (_, map) = build(&[("a.css", "   ")]);
        assert!(map.is_empty());
    }
}

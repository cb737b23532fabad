//! WAI-ARIA role and accessible-name utilities.

use scraper::{ElementRef, Node};

use crate::element::Element;
use crate::page::Page;

/// WAI-ARIA 1.2 roles, including abstract-free document structure roles.
const ARIA_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote", "button",
    "caption", "cell", "checkbox", "code", "columnheader", "combobox", "complementary",
    "contentinfo", "definition", "deletion", "dialog", "directory", "document", "emphasis",
    "feed", "figure", "form", "generic", "grid", "gridcell", "group", "heading", "img",
    "insertion", "link", "list", "listbox", "listitem", "log", "main", "marquee", "math",
    "menu", "menubar", "menuitem", "menuitemcheckbox", "menuitemradio", "meter", "navigation",
    "none", "note", "option", "paragraph", "presentation", "progressbar", "radio",
    "radiogroup", "region", "row", "rowgroup", "rowheader", "scrollbar", "search",
    "searchbox", "separator", "slider", "spinbutton", "status", "strong", "subscript",
    "superscript", "switch", "tab", "table", "tablist", "tabpanel", "term", "textbox", "time",
    "timer", "toolbar", "tooltip", "tree", "treegrid", "treeitem",
];

pub fn is_aria_role(role: &str) -> bool {
    ARIA_ROLES.contains(&role)
}

/// Role an element has without an explicit `role` attribute.
pub fn implicit_role(element: &Element<'_>) -> Option<&'static str> {
    let has = |name: &str| element.has_attribute(name);
    let role = match element.tag_name() {
        "a" | "area" if has("href") => "link",
        "article" => "article",
        "aside" => "complementary",
        "blockquote" => "blockquote",
        "button" => "button",
        "datalist" => "listbox",
        "dd" => "definition",
        "details" | "fieldset" | "optgroup" => "group",
        "dialog" => "dialog",
        "dt" => "term",
        "figure" => "figure",
        "footer" => "contentinfo",
        "form" => "form",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "heading",
        "header" => "banner",
        "hr" => "separator",
        "img" => match element.attribute("alt") {
            Some("") => "presentation",
            _ => "img",
        },
        "input" => input_role(element)?,
        "li" => "listitem",
        "main" => "main",
        "math" => "math",
        "menu" | "ol" | "ul" => "list",
        "nav" => "navigation",
        "option" => "option",
        "output" => "status",
        "p" => "paragraph",
        "progress" => "progressbar",
        "section" if has("aria-label") || has("aria-labelledby") => "region",
        "select" => {
            let size = element
                .attribute("size")
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(0);
            if has("multiple") || size > 1 {
                "listbox"
            } else {
                "combobox"
            }
        }
        "table" => "table",
        "tbody" | "thead" | "tfoot" => "rowgroup",
        "td" => "cell",
        "textarea" => "textbox",
        "th" => "columnheader",
        "tr" => "row",
        _ => return None,
    };
    Some(role)
}

fn input_role(element: &Element<'_>) -> Option<&'static str> {
    let kind = element
        .attribute("type")
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_string());
    let role = match kind.as_str() {
        "button" | "image" | "reset" | "submit" => "button",
        "checkbox" => "checkbox",
        "radio" => "radio",
        "range" => "slider",
        "number" => "spinbutton",
        "search" => "searchbox",
        "email" | "tel" | "text" | "url" | "" => "textbox",
        _ => return None,
    };
    Some(role)
}

/// The explicit `role` attribute, or the implicit role.
pub fn element_role(element: &Element<'_>) -> Option<String> {
    element
        .non_empty_attribute("role")
        .map(str::to_string)
        .or_else(|| implicit_role(element).map(str::to_string))
}

/// Whether any token of the element's role is a WAI-ARIA role.
pub fn element_has_valid_role(element: &Element<'_>) -> bool {
    element_role(element)
        .map(|role| role.split_whitespace().any(is_aria_role))
        .unwrap_or(false)
}

/// A simplified accessible-name computation.
///
/// Sources are tried in order: `aria-labelledby`, `aria-label`, the
/// element's native labelling (alt text, `<label>`, button value, content),
/// and finally `title`.
pub fn accessible_name(element: &Element<'_>, page: &Page) -> Option<String> {
    labelledby_name(element, page)
        .or_else(|| element.non_empty_attribute("aria-label").map(normalize))
        .or_else(|| native_name(element, page))
        .or_else(|| element.non_empty_attribute("title").map(normalize))
}

fn labelledby_name(element: &Element<'_>, page: &Page) -> Option<String> {
    let ids = element.non_empty_attribute("aria-labelledby")?;
    let text = ids
        .split_whitespace()
        .filter_map(|id| page.element_by_id(id))
        .map(|label| name_from_content(&label))
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(normalize(&text))
}

fn native_name(element: &Element<'_>, page: &Page) -> Option<String> {
    match element.tag_name() {
        "img" | "area" => element.non_empty_attribute("alt").map(normalize),
        "input" => {
            let kind = element
                .attribute("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .unwrap_or_default();
            match kind.as_str() {
                "image" => element.non_empty_attribute("alt").map(normalize),
                "button" => element.non_empty_attribute("value").map(normalize),
                "submit" => Some(
                    element
                        .non_empty_attribute("value")
                        .map(normalize)
                        .unwrap_or_else(|| "Submit".to_string()),
                ),
                "reset" => Some(
                    element
                        .non_empty_attribute("value")
                        .map(normalize)
                        .unwrap_or_else(|| "Reset".to_string()),
                ),
                "hidden" => None,
                _ => label_name(element, page),
            }
        }
        "select" | "textarea" | "meter" | "progress" | "output" => label_name(element, page),
        "fieldset" => child_text(element, "legend"),
        "table" => child_text(element, "caption"),
        "figure" => child_text(element, "figcaption"),
        "a" | "button" | "summary" | "option" | "legend" | "caption" | "th" | "td" | "li"
        | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => non_empty(normalize(&name_from_content(element))),
        _ => match element_role(element).as_deref() {
            Some("button" | "link" | "heading" | "tab" | "menuitem" | "option" | "cell") => {
                non_empty(normalize(&name_from_content(element)))
            }
            _ => None,
        },
    }
}

/// Text of `<label for=id>` or an enclosing `<label>`.
fn label_name(element: &Element<'_>, page: &Page) -> Option<String> {
    if let Some(id) = element.non_empty_attribute("id") {
        let text = page
            .select("label")
            .into_iter()
            .filter(|label| label.attribute("for") == Some(id))
            .map(|label| name_from_content(&label))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(name) = non_empty(normalize(&text)) {
            return Some(name);
        }
    }
    element
        .ancestors()
        .find(|ancestor| ancestor.tag_name() == "label")
        .and_then(|label| non_empty(normalize(&name_from_content(&label))))
}

fn child_text(element: &Element<'_>, child: &str) -> Option<String> {
    element
        .children()
        .into_iter()
        .find(|c| c.tag_name() == child)
        .and_then(|c| non_empty(c.normalized_text()))
}

/// Text content, with images contributing their alt text.
fn name_from_content(element: &Element<'_>) -> String {
    let mut out = String::new();
    collect_content(element.element_ref(), &mut out);
    out
}

fn collect_content(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                if el.attr("aria-hidden") == Some("true") {
                    continue;
                }
                if let Some(label) = el.attr("aria-label").map(str::trim).filter(|l| !l.is_empty()) {
                    out.push(' ');
                    out.push_str(label);
                    out.push(' ');
                } else if el.name() == "img" {
                    if let Some(alt) = el.attr("alt") {
                        out.push(' ');
                        out.push_str(alt);
                        out.push(' ');
                    }
                } else {
                    collect_content(child_ref, out);
                }
            }
            _ => {}
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

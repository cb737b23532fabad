use a11yforge_page::Element;

/// Whether the element is excluded from the accessibility tree.
///
/// Uses the `hidden` attribute, `aria-hidden="true"` and mapped
/// `display: none` / `visibility: hidden` outside of any media query, on the
/// element or any ancestor.
pub fn is_hidden(element: &Element<'_>) -> bool {
    std::iter::once(*element)
        .chain(element.ancestors())
        .any(|el| {
            el.has_attribute("hidden")
                || el.attribute("aria-hidden").map(str::trim) == Some("true")
                || css_hides(&el)
        })
}

fn css_hides(element: &Element<'_>) -> bool {
    let unconditional = |property: &str, hidden: &str| {
        element
            .css_property(property)
            .filter(|d| d.media.is_none())
            .is_some_and(|d| d.specified().eq_ignore_ascii_case(hidden))
    };
    unconditional("display", "none") || unconditional("visibility", "hidden")
}

/// The explicit `role` tokens, lowercased.
pub fn explicit_roles(element: &Element<'_>) -> Vec<String> {
    element
        .attribute("role")
        .map(|role| role.split_whitespace().map(str::to_ascii_lowercase).collect())
        .unwrap_or_default()
}

/// Whether an explicit role other than `expected` overrides the element's role.
pub fn has_other_explicit_role(element: &Element<'_>, expected: &str) -> bool {
    explicit_roles(element)
        .first()
        .is_some_and(|role| role != expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, page_with_css};

    #[test]
    fn test_hidden_by_attributes() {
        let page = page(r#"<div hidden><a id="a" href="/">x</a></div><p aria-hidden="true" id="b"></p><p id="c"></p>"#);
        assert!(is_hidden(&page.element_by_id("a").unwrap()));
        assert!(is_hidden(&page.element_by_id("b").unwrap()));
        assert!(!is_hidden(&page.element_by_id("c").unwrap()));
    }

    #[test]
    fn test_hidden_by_css() {
        let page = page_with_css(
            r#"<div class="off"><span id="a"></span></div><span id="b"></span>"#,
            ".off { display: none } @media print { #b { visibility: hidden } }",
        );
        assert!(is_hidden(&page.element_by_id("a").unwrap()));
        assert!(!is_hidden(&page.element_by_id("b").unwrap()));
    }

    #[test]
    fn test_explicit_roles() {
        let page = page(r#"<a id="a" href="/" role="Button Link"></a><a id="b" href="/"></a>"#);
        let a = page.element_by_id("a").unwrap();
        assert_eq!(explicit_roles(&a), vec!["button", "link"]);
        assert!(has_other_explicit_role(&a, "link"));
        assert!(!has_other_explicit_role(&page.element_by_id("b").unwrap(), "link"));
    }
}

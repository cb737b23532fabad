use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::{Criterion, Rule, RuleDefinition, RuleRecord};

use super::{normalized_value, split_number};

static ROTATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"rotate(?:z)?\(\s*([^)]*)\)").unwrap());

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-CSS-T9",
    name: "Orientation of the page is not restricted using CSS transform property",
    mapping: "b33eff",
    description: "This technique checks that page content is not restricted to either landscape or portrait orientation using CSS transforms.",
    target: "*",
    success_criteria: &[Criterion {
        name: "1.3.4",
        level: "AA",
        principle: "Perceivable",
        url: "https://www.w3.org/WAI/WCAG21/Understanding/orientation",
    }],
    related: &[],
    url: "https://act-rules.github.io/rules/b33eff",
};

pub struct QwCssT9;

impl Rule for QwCssT9 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(transform) = element.css_property("transform") else {
            return;
        };
        let in_orientation_query = transform
            .media
            .as_deref()
            .is_some_and(|media| media.to_ascii_lowercase().contains("orientation"));
        if !in_orientation_query {
            return;
        }

        if locks_orientation(&normalized_value(transform)) {
            record.verdict(
                Verdict::Failed,
                "RC1",
                "The element is rotated by 90 degrees under an orientation media query.",
                Some(element),
            );
        } else {
            record.verdict(
                Verdict::Passed,
                "RC2",
                "The transform under an orientation media query doesn't restrict the orientation.",
                Some(element),
            );
        }
    }
}

/// Whether a transform rotates by a quarter turn.
fn locks_orientation(transform: &str) -> bool {
    ROTATE.captures_iter(transform).any(|caps| {
        let Some((angle, unit)) = split_number(caps[1].trim()) else {
            return false;
        };
        let degrees = match unit {
            "deg" => angle,
            "rad" => angle.to_degrees(),
            "grad" => angle * 0.9,
            "turn" => angle * 360.0,
            _ => return false,
        };
        ((degrees.abs() % 180.0) - 90.0).abs() < 0.5
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page_with_css, run};

    #[test]
    fn test_quarter_turns() {
        assert!(locks_orientation("rotate(90deg)"));
        assert!(locks_orientation("translate(0) rotate(-90deg)"));
        assert!(locks_orientation("rotate(0.25turn)"));
        assert!(locks_orientation("rotatez(270deg)"));
        assert!(!locks_orientation("rotate(45deg)"));
        assert!(!locks_orientation("scale(2)"));
    }

    #[test]
    fn test_orientation_media() {
        let page = page_with_css(
            r#"<main id="m">a</main><div id="d">b</div><p id="p">c</p>"#,
            "@media (orientation: portrait) { #m { transform: rotate(90deg) } #d { transform: scale(1) } } #p { transform: rotate(90deg) }",
        );
        assert_eq!(codes(&run(&QwCssT9, &page)), vec!["RC1", "RC2"]);
    }
}

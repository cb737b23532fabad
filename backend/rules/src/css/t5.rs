use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::{normalized_value, split_number, SC_1_4_8};

const MIN_LINE_HEIGHT: f64 = 1.5;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-CSS-T5",
    name: "Specifying line spacing in CSS",
    mapping: "C21",
    description: "This technique checks that line spacing is at least one and a half times the font size.",
    target: "*",
    success_criteria: &[SC_1_4_8],
    related: &["G188"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/css/C21",
};

pub struct QwCssT5;

impl Rule for QwCssT5 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(line_height) = element.css_property("line-height") else {
            return;
        };
        let value = normalized_value(line_height);
        let ratio = match split_number(&value) {
            Some((number, "")) => Some(number),
            Some((number, "%")) => Some(number / 100.0),
            _ => None,
        };

        match ratio {
            Some(ratio) if ratio >= MIN_LINE_HEIGHT => record.verdict(
                Verdict::Passed,
                "RC1",
                "The line height is at least 1.5.",
                Some(element),
            ),
            Some(_) => record.verdict(
                Verdict::Failed,
                "RC2",
                "The line height is less than 1.5.",
                Some(element),
            ),
            None => record.verdict(
                Verdict::Warning,
                "RC3",
                &format!("The line height `{value}` should be verified manually."),
                Some(element),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page_with_css, run};

    #[test]
    fn test_line_heights() {
        let page = page_with_css(
            r#"<p id="a">a</p><p id="b">b</p><p id="c">c</p><p id="d">d</p>"#,
            "#a { line-height: 1.5 } #b { line-height: 120% } #c { line-height: 24px } #d { line-height: 200% }",
        );
        assert_eq!(codes(&run(&QwCssT5, &page)), vec!["RC1", "RC2", "RC3", "RC1"]);
    }
}

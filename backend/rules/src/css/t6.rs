use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Criterion, Rule, RuleDefinition, RuleRecord};

use super::normalized_value;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-CSS-T6",
    name: "Failure of Success Criterion 2.2.2 due to using text-decoration:blink without a mechanism to stop it in less than five seconds",
    mapping: "F4",
    description: "This technique checks that text-decoration: blink is not used.",
    target: "*",
    success_criteria: &[Criterion {
        name: "2.2.2",
        level: "A",
        principle: "Operable",
        url: "https://www.w3.org/WAI/WCAG21/Understanding/pause-stop-hide",
    }],
    related: &["F47"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/failures/F4",
};

pub struct QwCssT6;

impl Rule for QwCssT6 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(decoration) = element.css_property("text-decoration") else {
            return;
        };
        let value = normalized_value(decoration);
        if value.split_whitespace().any(|token| token == "blink") {
            record.verdict(Verdict::Failed, "RC1", "The text blinks.", Some(element));
        } else {
            record.verdict(Verdict::Passed, "RC2", "The text decoration doesn't blink.", Some(element));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page_with_css, run};

    #[test]
    fn test_blink_decoration() {
        let page = page_with_css(
            r#"<span class="b">a</span><span class="u">b</span>"#,
            ".b { text-decoration: underline blink } .u { text-decoration: underline }",
        );
        assert_eq!(codes(&run(&QwCssT6, &page)), vec!["RC1", "RC2"]);
    }
}

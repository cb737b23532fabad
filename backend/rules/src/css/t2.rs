use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::{normalized_value, SC_1_4_8};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-CSS-T2",
    name: "Failure of Success Criterion 1.4.8 due to using justified text",
    mapping: "F88",
    description: "This technique checks that text is not fully justified.",
    target: "*",
    success_criteria: &[SC_1_4_8],
    related: &["C19", "G169", "G172"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/failures/F88",
};

pub struct QwCssT2;

impl Rule for QwCssT2 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(text_align) = element.css_property("text-align") else {
            return;
        };
        if normalized_value(text_align) == "justify" {
            record.verdict(Verdict::Failed, "RC1", "The text is justified.", Some(element));
        } else {
            record.verdict(Verdict::Passed, "RC2", "The text is not justified.", Some(element));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page_with_css, run};

    #[test]
    fn test_justified_text() {
        let page = page_with_css(
            r#"<p class="j">a</p><p class="l">b</p><p>c</p>"#,
            ".j { text-align: Justify !important } .l { text-align: left }",
        );
        assert_eq!(codes(&run(&QwCssT2, &page)), vec!["RC1", "RC2"]);
    }
}

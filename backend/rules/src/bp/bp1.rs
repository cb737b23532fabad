use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::html::SC_1_3_1;
use crate::rule::{Applicability, Rule, RuleDefinition, RuleRecord};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-BP1",
    name: "Using h1-h6 to identify headings",
    mapping: "H42",
    description: "This best practice checks that the page uses heading markup to convey its structure.",
    target: "h1, h2, h3, h4, h5, h6",
    success_criteria: &[SC_1_3_1],
    related: &["G141"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/html/H42",
};

pub struct QwBp1;

impl Rule for QwBp1 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn applicability(&self) -> Applicability {
        Applicability::Document
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        match element {
            Some(heading) => record.verdict(
                Verdict::Passed,
                "RC1",
                &format!("The page uses a `{}` heading.", heading.tag_name()),
                Some(heading),
            ),
            None => record.verdict(Verdict::Failed, "RC2", "The page doesn't use heading elements.", None),
        }
    }
}

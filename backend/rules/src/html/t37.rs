use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Applicability, Criterion, Rule, RuleDefinition, RuleRecord};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-HTML-T37",
    name: "Failure due to using the blink or marquee element",
    mapping: "F47",
    description: "The blink and marquee elements make content move or blink with no way for the user to stop it.",
    target: "blink, marquee",
    success_criteria: &[Criterion {
        name: "2.2.2",
        level: "A",
        principle: "Operable",
        url: "https://www.w3.org/WAI/WCAG21/Understanding/pause-stop-hide",
    }],
    related: &["F16", "F4"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/failures/F47",
};

pub struct QwHtmlT37;

impl Rule for QwHtmlT37 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn applicability(&self) -> Applicability {
        Applicability::Document
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        match element {
            None => record.verdict(Verdict::Passed, "RC1", "No blink or marquee elements are used.", None),
            Some(element) => record.verdict(
                Verdict::Failed,
                "RC2",
                &format!("The `{}` element is used.", element.tag_name()),
                Some(element),
            ),
        }
    }
}

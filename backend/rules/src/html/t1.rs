use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::act::SC_1_1_1;
use crate::rule::{Rule, RuleDefinition, RuleRecord};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-HTML-T1",
    name: "Providing text alternatives for the area elements of image maps",
    mapping: "H24",
    description: "The objective of this technique is to provide text alternatives that serve the same purpose as the selectable regions of an image map.",
    target: "area",
    success_criteria: &[SC_1_1_1],
    related: &["G91", "H30", "H78"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/html/H24",
};

pub struct QwHtmlT1;

impl Rule for QwHtmlT1 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(area) = element else {
            return;
        };
        if area.non_empty_attribute("alt").is_some() {
            record.verdict(Verdict::Passed, "RC1", "The area element has a text alternative.", Some(area));
        } else {
            record.verdict(
                Verdict::Failed,
                "RC2",
                "The area element doesn't have a text alternative.",
                Some(area),
            );
        }
    }
}

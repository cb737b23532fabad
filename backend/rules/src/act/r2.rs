use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::SC_3_1_1;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R2",
    name: "HTML page has lang attribute",
    mapping: "b5c3f8",
    description: "This rule checks that an HTML page has a non-empty lang attribute.",
    target: "html",
    success_criteria: &[SC_3_1_1],
    related: &["H57"],
    url: "https://act-rules.github.io/rules/b5c3f8",
};

pub struct QwActR2;

impl Rule for QwActR2 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(html) = element else {
            return;
        };
        if html.non_empty_attribute("lang").is_some() {
            record.verdict(Verdict::Passed, "RC1", "The `lang` attribute exists and has a value.", Some(html));
        } else {
            record.verdict(
                Verdict::Failed,
                "RC2",
                "The `lang` attribute doesn't exist or is empty (\"\").",
                Some(html),
            );
        }
    }
}

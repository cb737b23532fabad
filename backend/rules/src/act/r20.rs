use a11yforge_core::Verdict;
use a11yforge_page::{element_has_valid_role, Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};
use crate::util::is_hidden;

use super::SC_4_1_2;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R20",
    name: "role attribute has valid value",
    mapping: "674b10",
    description: "This rule checks that each role attribute has a valid value.",
    target: "[role]",
    success_criteria: &[SC_4_1_2],
    related: &[],
    url: "https://act-rules.github.io/rules/674b10",
};

pub struct QwActR20;

impl Rule for QwActR20 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        if element.non_empty_attribute("role").is_none() || is_hidden(element) {
            return;
        }
        if element_has_valid_role(element) {
            record.verdict(Verdict::Passed, "RC1", "The `role` attribute has a valid value.", Some(element));
        } else {
            record.verdict(Verdict::Failed, "RC2", "The `role` attribute doesn't have a valid value.", Some(element));
        }
    }
}

use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-BP32",
    name: "Chatbot provides voice output",
    mapping: "",
    description: "The chatbot can provide voice output.",
    target: "body",
    success_criteria: &[],
    related: &[],
    url: "",
};

/// Voice output can't be observed statically; always flagged for review.
pub struct QwBp32;

impl Rule for QwBp32 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(body) = element else {
            return;
        };
        record.verdict(
            Verdict::Warning,
            "RC1",
            "Check whether the chatbot can provide voice output.",
            Some(body),
        );
    }
}

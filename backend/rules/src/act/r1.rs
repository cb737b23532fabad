use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Applicability, Rule, RuleDefinition, RuleRecord};

use super::SC_2_4_2;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R1",
    name: "HTML Page has a title",
    mapping: "2779a5",
    description: "This rule checks that a non-embedded HTML page has a title.",
    target: "title",
    success_criteria: &[SC_2_4_2],
    related: &["G88", "H25"],
    url: "https://act-rules.github.io/rules/2779a5",
};

/// The first `title` decides; later ones are inapplicable.
pub struct QwActR1;

impl Rule for QwActR1 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn applicability(&self) -> Applicability {
        Applicability::Document
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        if record.passed_count() > 0 || record.failed_count() > 0 {
            record.verdict(
                Verdict::Inapplicable,
                "RC4",
                "There's already a `title` element that passes or fails the rule.",
                element,
            );
            return;
        }

        match element {
            None => record.verdict(Verdict::Failed, "RC1", "The `title` element doesn't exist.", None),
            Some(title) if title.normalized_text().is_empty() => record.verdict(
                Verdict::Failed,
                "RC2",
                "The `title` element is empty (\"\").",
                Some(title),
            ),
            Some(title) if in_foreign_content(title) => record.verdict(
                Verdict::Failed,
                "RC3",
                "The `title` element is not in the same context.",
                Some(title),
            ),
            Some(title) => record.verdict(
                Verdict::Passed,
                "RC4",
                "The `title` element exists and it's not empty (\"\").",
                Some(title),
            ),
        }
    }
}

/// Titles of embedded SVG or MathML, or outside `head`, are not the page title.
fn in_foreign_content(title: &Element<'_>) -> bool {
    let mut in_head = false;
    for ancestor in title.ancestors() {
        match ancestor.tag_name() {
            "svg" | "math" => return true,
            "head" => in_head = true,
            _ => {}
        }
    }
    !in_head
}

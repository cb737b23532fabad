use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Criterion, Rule, RuleDefinition, RuleRecord};

use super::SC_1_3_1;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-HTML-T3",
    name: "Using the fieldset and legend elements to group form controls",
    mapping: "H71",
    description: "The objective of this technique is to provide a semantic grouping for related form controls.",
    target: "fieldset",
    success_criteria: &[
        SC_1_3_1,
        Criterion {
            name: "3.3.2",
            level: "A",
            principle: "Understandable",
            url: "https://www.w3.org/WAI/WCAG21/Understanding/labels-or-instructions",
        },
    ],
    related: &["H44", "H82"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/html/H71",
};

pub struct QwHtmlT3;

impl Rule for QwHtmlT3 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(fieldset) = element else {
            return;
        };
        let legend = fieldset
            .children()
            .into_iter()
            .next()
            .filter(|child| child.tag_name() == "legend");
        match legend {
            Some(legend) if !legend.normalized_text().is_empty() => record.verdict(
                Verdict::Passed,
                "RC1",
                "The fieldset has a legend describing the group.",
                Some(fieldset),
            ),
            Some(_) => record.verdict(Verdict::Failed, "RC2", "The legend of the fieldset is empty.", Some(fieldset)),
            None => record.verdict(
                Verdict::Failed,
                "RC3",
                "The fieldset doesn't start with a legend element.",
                Some(fieldset),
            ),
        }
    }
}

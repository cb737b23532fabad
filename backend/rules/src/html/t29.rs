use std::collections::HashMap;

use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Criterion, Rule, RuleDefinition, RuleRecord};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-HTML-T29",
    name: "Failure of Success Criterion 4.1.1 due to duplicate values of type ID",
    mapping: "F77",
    description: "This describes a failure condition where duplicate ID errors are known to cause problems for assistive technologies.",
    target: "[id]",
    success_criteria: &[Criterion {
        name: "4.1.1",
        level: "A",
        principle: "Robust",
        url: "https://www.w3.org/WAI/WCAG21/Understanding/parsing",
    }],
    related: &["H93", "H94"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/failures/F77",
};

pub struct QwHtmlT29;

impl Rule for QwHtmlT29 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(id) = element.attribute("id").filter(|id| !id.is_empty()) else {
            return;
        };
        let occurrences = id_counts(page).get(id).copied().unwrap_or(0);
        if occurrences > 1 {
            record.verdict(
                Verdict::Failed,
                "RC1",
                &format!("The id \"{id}\" is used by {occurrences} elements."),
                Some(element),
            );
        } else {
            record.verdict(Verdict::Passed, "RC2", "The id is unique.", Some(element));
        }
    }
}

fn id_counts(page: &Page) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for element in page.elements() {
        if let Some(id) = element.attribute("id") {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page, run};

    #[test]
    fn test_duplicate_ids() {
        let page = page(r#"<div id="a"></div><p id="b"></p><span id="a"></span><i id=""></i>"#);
        let report = run(&QwHtmlT29, &page);
        assert_eq!(codes(&report), vec!["RC1", "RC2", "RC1"]);
        assert_eq!(report.results[0].description, "The id \"a\" is used by 2 elements.");
    }
}

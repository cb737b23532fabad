use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::act::SC_2_4_2;
use crate::rule::{Rule, RuleDefinition, RuleRecord};

const MAX_TITLE_LEN: usize = 64;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-BP6",
    name: "Title element is not too long",
    mapping: "",
    description: "This best practice checks that the page title is at most 64 characters long.",
    target: "head > title",
    success_criteria: &[SC_2_4_2],
    related: &[],
    url: "",
};

pub struct QwBp6;

impl Rule for QwBp6 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(title) = element else {
            return;
        };
        if record.result_count() > 0 {
            return;
        }
        let length = title.normalized_text().chars().count();
        if length <= MAX_TITLE_LEN {
            record.verdict(Verdict::Passed, "RC1", "The page title has 64 characters or less.", Some(title));
        } else {
            record.verdict(
                Verdict::Failed,
                "RC2",
                &format!("The page title has {length} characters, more than 64."),
                Some(title),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, document, run};

    fn titled(title: &str) -> String {
        format!("<html><head><title>{title}</title></head><body></body></html>")
    }

    #[test]
    fn test_title_length() {
        assert_eq!(codes(&run(&QwBp6, &document(&titled("Short")))), vec!["RC1"]);
        assert_eq!(codes(&run(&QwBp6, &document(&titled(&"é".repeat(64))))), vec!["RC1"]);
        assert_eq!(codes(&run(&QwBp6, &document(&titled(&"a".repeat(65))))), vec!["RC2"]);
    }
}

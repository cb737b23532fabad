use a11yforge_core::Verdict;
use a11yforge_page::{accessible_name, Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};
use crate::util::{has_other_explicit_role, is_hidden};

use super::SC_4_1_2;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R11",
    name: "Button has accessible name",
    mapping: "97a4e1",
    description: "This rule checks that each button element has an accessible name.",
    target: r#"button, input[type="button"], input[type="submit"], input[type="reset"], input[type="image"], [role="button"]"#,
    success_criteria: &[SC_4_1_2],
    related: &["ARIA14", "ARIA16"],
    url: "https://act-rules.github.io/rules/97a4e1",
};

pub struct QwActR11;

impl Rule for QwActR11 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord) {
        let Some(button) = element else {
            return;
        };
        if has_other_explicit_role(button, "button") || is_hidden(button) {
            return;
        }
        if accessible_name(button, page).is_some() {
            record.named_verdict(Verdict::Passed, "RC1", "The button has an accessible name.", button, page);
        } else {
            record.named_verdict(Verdict::Failed, "RC2", "The button doesn't have an accessible name.", button, page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page, run};

    #[test]
    fn test_buttons() {
        let page = page(
            r#"<button>Save</button>
               <button></button>
               <button aria-label="Close">x</button>
               <div role="button"></div>
               <button role="link"></button>
               <button hidden></button>
               <input type="submit">"#,
        );
        let report = run(&QwActR11, &page);
        assert_eq!(codes(&report), vec!["RC1", "RC2", "RC1", "RC2", "RC1"]);
        assert_eq!(report.results[0].elements[0].accessible_name.as_deref(), Some("Save"));
        assert_eq!(report.results[1].elements[0].accessible_name, None);
    }
}

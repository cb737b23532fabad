use a11yforge_core::Verdict;
use a11yforge_page::{accessible_name, Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};
use crate::util::{has_other_explicit_role, is_hidden};

use super::{SC_2_4_4, SC_4_1_2};

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R12",
    name: "Link has accessible name",
    mapping: "c487ae",
    description: "This rule checks that each link has an accessible name.",
    target: r#"a[href], area[href], [role="link"]"#,
    success_criteria: &[SC_2_4_4, SC_4_1_2],
    related: &["H30", "H91", "G91", "ARIA7", "ARIA8"],
    url: "https://act-rules.github.io/rules/c487ae",
};

pub struct QwActR12;

impl Rule for QwActR12 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord) {
        let Some(link) = element else {
            return;
        };
        if has_other_explicit_role(link, "link") || is_hidden(link) {
            return;
        }
        if accessible_name(link, page).is_some() {
            record.named_verdict(Verdict::Passed, "RC1", "The link has an accessible name.", link, page);
        } else {
            record.named_verdict(Verdict::Failed, "RC2", "The link doesn't have an accessible name.", link, page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page, run};
    use a11yforge_core::Outcome;

    #[test]
    fn test_links() {
        let page = page(
            r#"<a href="/">Home</a>
               <a href="/x"><img src="logo.png" alt="Logo"></a>
               <a href="/y"></a>
               <a href="/z" role="button"></a>
               <span role="link" aria-label="More"></span>
               <a name="anchor"></a>"#,
        );
        let report = run(&QwActR12, &page);
        assert_eq!(codes(&report), vec!["RC1", "RC1", "RC2", "RC1"]);
        assert_eq!(report.outcome(), Outcome::Failed);
        assert_eq!(report.results[1].elements[0].accessible_name.as_deref(), Some("Logo"));
    }
}

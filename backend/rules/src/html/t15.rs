use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::SC_1_3_1;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-HTML-T15",
    name: "Failure of Success Criterion 1.3.1 due to using th elements, caption elements, or non-empty summary attributes in layout tables",
    mapping: "F46",
    description: "The objective of this technique is to describe a failure that occurs when a table used only for layout includes either th elements, a summary attribute, or a caption element.",
    target: "table",
    success_criteria: &[SC_1_3_1],
    related: &["H39", "H51", "H73"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/failures/F46",
};

pub struct QwHtmlT15;

impl Rule for QwHtmlT15 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(table) = element else {
            return;
        };
        if table.non_empty_attribute("summary").is_some() {
            record.verdict(
                Verdict::Failed,
                "RC1",
                "The table has a non-empty summary - Amend it if it's a layout table",
                Some(table),
            );
        } else if !table.descendants_named("th").is_empty() {
            record.verdict(
                Verdict::Failed,
                "RC2",
                "The table has a th element - Amend it if it's a layout table",
                Some(table),
            );
        } else if !table.descendants_named("caption").is_empty() {
            record.verdict(
                Verdict::Failed,
                "RC3",
                "The table has a caption element - Amend it if it's a layout table",
                Some(table),
            );
        } else {
            record.verdict(Verdict::Warning, "RC4", "No incorrect elements used in layout table", Some(table));
        }
    }
}

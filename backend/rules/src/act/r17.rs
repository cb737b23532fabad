use a11yforge_core::Verdict;
use a11yforge_page::{accessible_name, Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};
use crate::util::{explicit_roles, is_hidden};

use super::SC_1_1_1;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R17",
    name: "Image has accessible name",
    mapping: "23a2a8",
    description: "This rule checks that each image either has a non-empty accessible name or is marked up as decorative.",
    target: r#"img, [role="img"]"#,
    success_criteria: &[SC_1_1_1],
    related: &["G94", "G95", "ARIA6", "ARIA10", "H37", "H67"],
    url: "https://act-rules.github.io/rules/23a2a8",
};

pub struct QwActR17;

impl Rule for QwActR17 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord) {
        let Some(image) = element else {
            return;
        };
        if is_hidden(image) {
            return;
        }
        let roles = explicit_roles(image);
        let first_role = roles.first().map(String::as_str);
        if image.tag_name() == "img" && first_role.is_some_and(|r| r != "img" && r != "presentation" && r != "none") {
            return;
        }

        if is_decorative(image, first_role) {
            record.verdict(Verdict::Passed, "RC1", "The image is marked as decorative.", Some(image));
        } else if accessible_name(image, page).is_some() {
            record.named_verdict(Verdict::Passed, "RC2", "The image has an accessible name.", image, page);
        } else {
            record.named_verdict(
                Verdict::Failed,
                "RC3",
                "The image doesn't have an accessible name and isn't marked as decorative.",
                image,
                page,
            );
        }
    }
}

fn is_decorative(image: &Element<'_>, role: Option<&str>) -> bool {
    match role {
        Some("presentation" | "none") => true,
        Some(_) => false,
        None => image.tag_name() == "img" && image.attribute("alt") == Some(""),
    }
}

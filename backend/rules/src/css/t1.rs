use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::{normalized_value, split_number, SC_1_4_4};

const RELATIVE_UNITS: &[&str] = &["em", "rem", "%", "ex", "ch", "vw", "vh", "vmin", "vmax"];
const ABSOLUTE_UNITS: &[&str] = &["px", "pt", "pc", "cm", "mm", "in", "q"];
/// Keywords resolved against the user's default font size.
const KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "smaller", "larger", "inherit", "initial", "unset", "revert",
];

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-CSS-T1",
    name: "Using percent, em, named font size for font sizes",
    mapping: "C12",
    description: "This technique checks that font sizes are specified with relative units so text can be resized.",
    target: "*",
    success_criteria: &[SC_1_4_4],
    related: &["C12", "C13", "C14"],
    url: "https://www.w3.org/WAI/WCAG21/Techniques/css/C12",
};

pub struct QwCssT1;

impl Rule for QwCssT1 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(element) = element else {
            return;
        };
        let Some(font_size) = element.css_property("font-size") else {
            return;
        };
        let value = normalized_value(font_size);

        let unit = match split_number(&value) {
            Some((number, _)) if number == 0.0 => None,
            Some((_, unit)) => Some(unit),
            None if KEYWORDS.contains(&value.as_str()) => None,
            None => {
                record.verdict(
                    Verdict::Warning,
                    "RC3",
                    &format!("The font size `{value}` can't be verified automatically."),
                    Some(element),
                );
                return;
            }
        };

        match unit {
            Some(unit) if ABSOLUTE_UNITS.contains(&unit) => record.verdict(
                Verdict::Failed,
                "RC2",
                &format!("The font size uses the absolute unit `{unit}`."),
                Some(element),
            ),
            Some(unit) if !RELATIVE_UNITS.contains(&unit) => record.verdict(
                Verdict::Warning,
                "RC3",
                &format!("The font size `{value}` can't be verified automatically."),
                Some(element),
            ),
            _ => record.verdict(Verdict::Passed, "RC1", "The font size is relative.", Some(element)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page_with_css, run};

    #[test]
    fn test_font_size_units() {
        let page = page_with_css(
            r#"<p id="a">a</p><p id="b">b</p><p id="c">c</p><p id="d">d</p><p id="e">e</p><p id="f">f</p>"#,
            "#a { font-size: 1.2em } #b { font-size: 12PX } #c { font-size: larger } #d { font-size: calc(1em + 2px) } #e { font-size: 90% !important } #f { color: red }",
        );
        assert_eq!(codes(&run(&QwCssT1, &page)), vec!["RC1", "RC2", "RC1", "RC3", "RC1"]);
    }
}

use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::{Rule, RuleDefinition, RuleRecord};

static AUDIO_INPUT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)getUserMedia|captureStream|microphone").unwrap());

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-BP30",
    name: "Potential microphone usage",
    mapping: "",
    description: "This best practice detects whether the page may request or use microphone input.",
    target: "body",
    success_criteria: &[],
    related: &[],
    url: "",
};

pub struct QwBp30;

impl Rule for QwBp30 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord) {
        let Some(body) = element else {
            return;
        };
        if potential_microphone_usage(body, page) {
            record.verdict(
                Verdict::Passed,
                "P1",
                "The page potentially requests or uses microphone access.",
                Some(body),
            );
        } else {
            record.verdict(
                Verdict::Failed,
                "F1",
                "No indication of microphone usage found on the page.",
                Some(body),
            );
        }
    }
}

fn potential_microphone_usage(body: &Element<'_>, page: &Page) -> bool {
    !page.select("audio, video, [microphone], [data-microphone]").is_empty()
        || AUDIO_INPUT_PATTERN.is_match(&body.element_ref().inner_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, page, run};

    #[test]
    fn test_microphone_indicators() {
        assert_eq!(codes(&run(&QwBp30, &page("<video src=\"a.mp4\"></video>"))), vec!["P1"]);
        assert_eq!(codes(&run(&QwBp30, &page("<button data-microphone>Talk</button>"))), vec!["P1"]);
        assert_eq!(
            codes(&run(&QwBp30, &page("<script>navigator.mediaDevices.getUserMedia({audio: true})</script>"))),
            vec!["P1"]
        );
        assert_eq!(codes(&run(&QwBp30, &page("<p>Plain page</p>"))), vec!["F1"]);
    }
}

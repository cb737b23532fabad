use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Criterion, Rule, RuleDefinition, RuleRecord};

/// Refreshes delayed by more than this many seconds (20 hours) are not a problem.
const MAX_UNNOTICEABLE_DELAY: f64 = 72000.0;

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R4",
    name: "Meta-refresh no delay",
    mapping: "bc659a",
    description: "This rule checks that the meta element is not used for delayed redirecting or refreshing.",
    target: "meta[http-equiv]",
    success_criteria: &[
        Criterion {
            name: "2.2.1",
            level: "A",
            principle: "Operable",
            url: "https://www.w3.org/WAI/WCAG21/Understanding/timing-adjustable",
        },
        Criterion {
            name: "2.2.4",
            level: "AAA",
            principle: "Operable",
            url: "https://www.w3.org/WAI/WCAG21/Understanding/interruptions",
        },
        Criterion {
            name: "3.2.5",
            level: "AAA",
            principle: "Understandable",
            url: "https://www.w3.org/WAI/WCAG21/Understanding/change-on-request",
        },
    ],
    related: &["H76", "F40", "F41"],
    url: "https://act-rules.github.io/rules/bc659a",
};

pub struct QwActR4;

impl Rule for QwActR4 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(meta) = element else {
            return;
        };
        let is_refresh = meta
            .attribute("http-equiv")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("refresh"));
        if !is_refresh {
            return;
        }

        match meta.attribute("content").and_then(refresh_delay) {
            None => record.verdict(
                Verdict::Inapplicable,
                "RC4",
                "The `content` attribute is invalid.",
                Some(meta),
            ),
            Some(delay) if delay == 0.0 => record.verdict(
                Verdict::Passed,
                "RC1",
                "The `content` attribute redirects or refreshes immediately.",
                Some(meta),
            ),
            Some(delay) if delay > MAX_UNNOTICEABLE_DELAY => record.verdict(
                Verdict::Passed,
                "RC2",
                "The `content` attribute refreshes after more than 20 hours.",
                Some(meta),
            ),
            Some(_) => record.verdict(
                Verdict::Failed,
                "RC3",
                "The `content` attribute redirects or refreshes with a delay.",
                Some(meta),
            ),
        }
    }
}

/// The delay of a refresh `content` value such as `5; url=/next`.
fn refresh_delay(content: &str) -> Option<f64> {
    let delay = content
        .trim()
        .split([';', ','])
        .next()
        .unwrap_or_default()
        .trim();
    if delay.is_empty() || !delay.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    delay.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{codes, document, run};

    fn meta(content: &str) -> String {
        format!(r#"<html><head><meta http-equiv="refresh" content="{content}"></head><body></body></html>"#)
    }

    #[test]
    fn test_refresh_delays() {
        assert_eq!(codes(&run(&QwActR4, &document(&meta("0; url=/next")))), vec!["RC1"]);
        assert_eq!(codes(&run(&QwActR4, &document(&meta("72001")))), vec!["RC2"]);
        assert_eq!(codes(&run(&QwActR4, &document(&meta("30; URL=/")))), vec!["RC3"]);
        assert_eq!(codes(&run(&QwActR4, &document(&meta("soon")))), vec!["RC4"]);
    }

    #[test]
    fn test_other_http_equiv_is_ignored() {
        let page = document(r#"<html><head><meta http-equiv="content-type" content="text/html"></head></html>"#);
        assert!(run(&QwActR4, &page).results.is_empty());
    }

    #[test]
    fn test_refresh_delay_parsing() {
        assert_eq!(refresh_delay(" 5 ;url=x"), Some(5.0));
        assert_eq!(refresh_delay("1.5"), Some(1.5));
        assert_eq!(refresh_delay("-1"), None);
        assert_eq!(refresh_delay(""), None);
    }
}

//! The rule catalogue and the machinery to run it over a page.

pub mod act;
pub mod bp;
pub mod css;
pub mod html;
pub mod module;
pub mod rule;

mod util;

use a11yforge_core::ModuleKind;

pub use module::{run_rule, RuleModule};
pub use rule::{Applicability, Criterion, Rule, RuleDefinition, RuleRecord};

/// The rules of one module.
pub fn catalogue(kind: ModuleKind) -> RuleModule {
    let rules = match kind {
        ModuleKind::ActRules => act::rules(),
        ModuleKind::HtmlTechniques => html::rules(),
        ModuleKind::CssTechniques => css::rules(),
        ModuleKind::BestPractices => bp::rules(),
    };
    RuleModule::new(kind, rules)
}

/// Every rule definition, grouped by module.
pub fn all_definitions() -> Vec<(ModuleKind, &'static RuleDefinition)> {
    ModuleKind::ALL
        .iter()
        .flat_map(|&kind| {
            catalogue(kind)
                .rules()
                .iter()
                .map(|rule| (kind, rule.definition()))
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use a11yforge_core::{RuleReport, ViewportInfo};
    use a11yforge_page::{parse_stylesheet, Page, SourceHtml};

    use crate::module::run_rule;
    use crate::rule::Rule;

    /// A page whose body is `body`.
    pub fn page(body: &str) -> Page {
        page_with_css(body, "")
    }

    pub fn page_with_css(body: &str, css: &str) -> Page {
        let html = format!(
            "<!DOCTYPE html><html lang=\"en\"><head><title>Test page</title></head><body>{body}</body></html>"
        );
        document_with_css(&html, css)
    }

    /// A page from a complete document.
    pub fn document(html: &str) -> Page {
        document_with_css(html, "")
    }

    fn document_with_css(html: &str, css: &str) -> Page {
        let sheets = if css.is_empty() {
            Vec::new()
        } else {
            vec![parse_stylesheet("test.css", css)]
        };
        Page::new("https://example.com/", SourceHtml::parse(html), sheets, ViewportInfo::default())
    }

    pub fn run(rule: &dyn Rule, page: &Page) -> RuleReport {
        run_rule(rule, page)
    }

    /// Result codes in order.
    pub fn codes(report: &RuleReport) -> Vec<&str> {
        report.results.iter().map(|r| r.result_code.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_prefixed() {
        let definitions = all_definitions();
        let codes: HashSet<_> = definitions.iter().map(|(_, d)| d.code).collect();
        assert_eq!(codes.len(), definitions.len());
        for (kind, definition) in &definitions {
            let prefix = match kind {
                ModuleKind::ActRules => "QW-ACT-R",
                ModuleKind::HtmlTechniques => "QW-HTML-T",
                ModuleKind::CssTechniques => "QW-CSS-T",
                ModuleKind::BestPractices => "QW-BP",
            };
            assert!(definition.code.starts_with(prefix), "{}", definition.code);
        }
    }

    #[test]
    fn test_definitions_serialize_camel_case() {
        let (_, definition) = all_definitions()
            .into_iter()
            .find(|(_, d)| d.code == "QW-ACT-R2")
            .unwrap();
        let json = serde_json::to_value(definition).unwrap();
        assert_eq!(json["code"], "QW-ACT-R2");
        assert!(json["successCriteria"][0]["name"].is_string());
        assert!(json.get("success_criteria").is_none());
    }

    #[test]
    fn test_targets_are_valid_selectors() {
        // An invalid selector list matches nothing, not even `html`.
        let page = testing::document("<html><body></body></html>");
        for (_, definition) in all_definitions() {
            let probe = format!("html, {}", definition.target);
            assert!(
                !page.select(&probe).is_empty(),
                "{} has invalid target {}",
                definition.code,
                definition.target
            );
        }
    }
}

use a11yforge_core::{ModuleKind, ModuleReport, RuleFilter, RuleReport};
use a11yforge_page::Page;
use tracing::debug;

use crate::rule::{Applicability, Rule, RuleRecord};

/// The rules of one evaluation module.
pub struct RuleModule {
    kind: ModuleKind,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleModule {
    pub fn new(kind: ModuleKind, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { kind, rules }
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Run every rule the filter allows and collect the module report.
    pub fn run(&self, page: &Page, filter: &RuleFilter) -> ModuleReport {
        let mut report = ModuleReport::new(self.kind);
        for rule in &self.rules {
            let code = rule.definition().code;
            if !filter.allows(code) {
                continue;
            }
            let rule_report = run_rule(rule.as_ref(), page);
            debug!(
                module = %self.kind,
                rule = code,
                outcome = ?rule_report.outcome(),
                results = rule_report.results.len(),
                "Rule executed"
            );
            report.insert(rule_report);
        }
        report
    }
}

/// Apply one rule to every target element of the page.
pub fn run_rule(rule: &dyn Rule, page: &Page) -> RuleReport {
    let definition = rule.definition();
    let mut record = RuleRecord::new(definition);
    let targets = page.select(definition.target);
    if targets.is_empty() {
        if rule.applicability() == Applicability::Document {
            rule.execute(None, page, &mut record);
        }
    } else {
        for element in &targets {
            rule.execute(Some(element), page, &mut record);
        }
    }
    record.finish()
}

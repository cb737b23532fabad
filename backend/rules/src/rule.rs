use a11yforge_core::{ElementReport, RuleMetadata, RuleReport, SuccessCriterion, TestResult, Verdict};
use a11yforge_page::{accessible_name, Element, Page};
use serde::Serialize;

/// A WCAG success criterion, as carried by static rule definitions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub level: &'static str,
    pub principle: &'static str,
    pub url: &'static str,
}

impl From<&Criterion> for SuccessCriterion {
    fn from(c: &Criterion) -> Self {
        SuccessCriterion {
            name: c.name.to_string(),
            level: c.level.to_string(),
            principle: c.principle.to_string(),
            url: c.url.to_string(),
        }
    }
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    pub code: &'static str,
    pub name: &'static str,
    /// ACT rule id or WCAG technique code
    pub mapping: &'static str,
    pub description: &'static str,
    /// CSS selector of the elements the rule applies to
    pub target: &'static str,
    pub success_criteria: &'static [Criterion],
    pub related: &'static [&'static str],
    pub url: &'static str,
}

impl RuleDefinition {
    /// An empty report for this rule.
    pub fn new_report(&self) -> RuleReport {
        let metadata = RuleMetadata {
            target: self.target.to_string(),
            success_criteria: self.success_criteria.iter().map(SuccessCriterion::from).collect(),
            related: self.related.iter().map(|r| r.to_string()).collect(),
            url: self.url.to_string(),
            ..Default::default()
        };
        RuleReport::new(self.code, self.name, self.mapping, self.description, metadata)
    }
}

/// When a rule's `execute` is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Once per element matching the target; never when nothing matches
    ElementExists,
    /// Once per matching element, or once with `None` when nothing matches
    Document,
}

/// A single accessibility check.
pub trait Rule: Send + Sync {
    fn definition(&self) -> &'static RuleDefinition;

    fn applicability(&self) -> Applicability {
        Applicability::ElementExists
    }

    /// Evaluate one target element (or the document) and record results.
    fn execute(&self, element: Option<&Element<'_>>, page: &Page, record: &mut RuleRecord);
}

/// Results collected for one rule while it runs over a page.
#[derive(Debug)]
pub struct RuleRecord {
    report: RuleReport,
}

impl RuleRecord {
    pub fn new(definition: &RuleDefinition) -> Self {
        Self {
            report: definition.new_report(),
        }
    }

    pub fn add(&mut self, result: TestResult) {
        self.report.add_result(result);
    }

    /// Record a verdict about `element`, if any.
    pub fn verdict(
        &mut self,
        verdict: Verdict,
        result_code: &str,
        description: &str,
        element: Option<&Element<'_>>,
    ) {
        let mut result = TestResult::new(verdict, result_code, description);
        if let Some(element) = element {
            result = result.with_element(element.to_report());
        }
        self.add(result);
    }

    /// Record a verdict, reporting the element with its accessible name.
    pub fn named_verdict(
        &mut self,
        verdict: Verdict,
        result_code: &str,
        description: &str,
        element: &Element<'_>,
        page: &Page,
    ) {
        let report = ElementReport {
            accessible_name: accessible_name(element, page),
            ..element.to_report()
        };
        self.add(TestResult::new(verdict, result_code, description).with_element(report));
    }

    pub fn passed_count(&self) -> u32 {
        self.report.metadata.passed
    }

    pub fn failed_count(&self) -> u32 {
        self.report.metadata.failed
    }

    pub fn result_count(&self) -> usize {
        self.report.results.len()
    }

    /// The finished report. A rule without results stays inapplicable.
    pub fn finish(self) -> RuleReport {
        self.report
    }
}

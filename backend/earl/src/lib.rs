//! Translation of evaluation reports into EARL, the W3C Evaluation and
//! Report Language, serialized as JSON-LD.

use std::collections::BTreeMap;

use a11yforge_core::{EvaluationReport, ModuleKind, ModulesToExecute, Outcome, RuleReport, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const EARL_CONTEXT: &str = "https://act-rules.github.io/earl-context.json";
pub const DEFAULT_AGGREGATED_NAME: &str = "aggregated";

/// Which parts of the reports to translate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EarlOptions {
    /// Merge every page into a single report
    #[serde(default)]
    pub aggregated: bool,
    /// Key of the merged report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregated_name: Option<String>,
    /// Modules to translate (all when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<ModulesToExecute>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarlReport {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@graph")]
    pub graph: Vec<TestSubject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestSubject {
    #[serde(rename = "@type")]
    pub kind: String,
    pub source: String,
    pub assertor: Assertor,
    pub assertions: Vec<Assertion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Assertor {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub has_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assertion {
    #[serde(rename = "@type")]
    pub kind: String,
    pub test: TestCase,
    pub mode: String,
    pub result: EarlResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarlResult {
    #[serde(rename = "@type")]
    pub kind: String,
    pub outcome: String,
    pub source: Vec<ResultSource>,
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultSource {
    pub result: SourceResult,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceResult {
    pub pointer: String,
    pub outcome: String,
}

/// EARL outcome term. Results needing manual review map to `cantTell`.
pub fn earl_outcome(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Passed => "earl:passed",
        Outcome::Failed => "earl:failed",
        Outcome::Warning => "earl:cantTell",
        Outcome::Inapplicable => "earl:inapplicable",
    }
}

fn earl_verdict(verdict: Verdict) -> &'static str {
    earl_outcome(Outcome::from(verdict))
}

/// Translate native reports, keyed by URL.
pub fn generate_earl_report(
    evaluations: &BTreeMap<String, EvaluationReport>,
    options: Option<&EarlOptions>,
) -> BTreeMap<String, EarlReport> {
    let default_options = EarlOptions::default();
    let options = options.unwrap_or(&default_options);
    let modules = options.modules.unwrap_or_default();

    let subjects = evaluations
        .iter()
        .map(|(url, report)| (url.clone(), test_subject(report, &modules)));

    let reports: BTreeMap<String, EarlReport> = if options.aggregated {
        let name = options
            .aggregated_name
            .clone()
            .unwrap_or_else(|| DEFAULT_AGGREGATED_NAME.to_string());
        let graph = subjects.map(|(_, subject)| subject).collect();
        BTreeMap::from([(name, EarlReport::new(graph))])
    } else {
        subjects
            .map(|(url, subject)| (url, EarlReport::new(vec![subject])))
            .collect()
    };
    debug!(pages = evaluations.len(), reports = reports.len(), "Generated EARL reports");
    reports
}

impl EarlReport {
    fn new(graph: Vec<TestSubject>) -> Self {
        Self {
            context: EARL_CONTEXT.to_string(),
            graph,
        }
    }
}

fn test_subject(report: &EvaluationReport, modules: &ModulesToExecute) -> TestSubject {
    let date = report.system.date;
    let assertions = report
        .modules
        .iter()
        .filter(|(kind, _)| modules.is_enabled(**kind))
        .flat_map(|(_, module)| module.assertions.values())
        .map(|rule| assertion(rule, date))
        .collect();

    let url = &report.system.url;
    let source = if url.complete_url.is_empty() {
        url.input_url.clone()
    } else {
        url.complete_url.clone()
    };

    TestSubject {
        kind: "TestSubject".to_string(),
        source,
        assertor: Assertor {
            id: report.system.name.clone(),
            kind: "Software".to_string(),
            title: report.system.name.clone(),
            description: report.system.description.clone(),
            has_version: report.system.version.clone(),
        },
        assertions,
    }
}

fn assertion(rule: &RuleReport, date: DateTime<Utc>) -> Assertion {
    let source = rule
        .results
        .iter()
        .flat_map(|result| {
            result.elements.iter().map(move |element| ResultSource {
                result: SourceResult {
                    pointer: element.pointer.clone(),
                    outcome: earl_verdict(result.verdict).to_string(),
                },
            })
        })
        .collect();

    let id = if rule.metadata.url.is_empty() {
        rule.code.clone()
    } else {
        rule.metadata.url.clone()
    };

    Assertion {
        kind: "Assertion".to_string(),
        test: TestCase {
            id,
            kind: "TestCase".to_string(),
            title: rule.name.clone(),
            description: rule.description.clone(),
        },
        mode: "earl:automatic".to_string(),
        result: EarlResult {
            kind: "TestResult".to_string(),
            outcome: earl_outcome(rule.outcome()).to_string(),
            source,
            description: rule.metadata.description.clone(),
            date,
        },
    }
}

/// Convenience for callers selecting modules by kind.
pub fn options_for(kinds: &[ModuleKind]) -> EarlOptions {
    EarlOptions {
        modules: Some(ModulesToExecute::from_kinds(kinds)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yforge_core::{
        ElementReport, ModuleReport, PageInfo, RuleMetadata, SystemInfo, TestResult, UrlInfo,
    };

    fn evaluation(url: &str) -> EvaluationReport {
        let mut rule = RuleReport::new(
            "QW-ACT-R2",
            "HTML page has lang attribute",
            "b5c3f8",
            "Checks lang",
            RuleMetadata {
                url: "https://act-rules.github.io/rules/b5c3f8".to_string(),
                ..Default::default()
            },
        );
        rule.add_result(
            TestResult::new(Verdict::Failed, "RC2", "missing").with_element(ElementReport {
                pointer: "html".to_string(),
                html_code: "<html>".to_string(),
                accessible_name: None,
            }),
        );
        let mut act = ModuleReport::new(ModuleKind::ActRules);
        act.insert(rule);

        let mut review = RuleReport::new("QW-BP32", "Chatbot", "", "voice", RuleMetadata::default());
        review.add_result(TestResult::new(Verdict::Warning, "RC1", "check"));
        let mut bp = ModuleReport::new(ModuleKind::BestPractices);
        bp.insert(review);

        let mut report = EvaluationReport::new(SystemInfo::new(UrlInfo::parse(url), PageInfo::default()));
        report.add_module(act);
        report.add_module(bp);
        report
    }

    fn evaluations() -> BTreeMap<String, EvaluationReport> {
        ["https://a.test/", "https://b.test/"]
            .into_iter()
            .map(|url| (url.to_string(), evaluation(url)))
            .collect()
    }

    #[test]
    fn test_one_report_per_url() {
        let reports = generate_earl_report(&evaluations(), None);
        assert_eq!(reports.len(), 2);
        let report = &reports["https://a.test/"];
        assert_eq!(report.context, EARL_CONTEXT);
        let subject = &report.graph[0];
        assert_eq!(subject.source, "https://a.test/");
        assert_eq!(subject.assertions.len(), 2);

        let lang = &subject.assertions[0];
        assert_eq!(lang.test.id, "https://act-rules.github.io/rules/b5c3f8");
        assert_eq!(lang.result.outcome, "earl:failed");
        assert_eq!(lang.result.source[0].result.pointer, "html");
        assert_eq!(subject.assertions[1].result.outcome, "earl:cantTell");
        assert_eq!(subject.assertions[1].test.id, "QW-BP32");
    }

    #[test]
    fn test_module_selection_and_aggregation() {
        let options = EarlOptions {
            aggregated: true,
            ..options_for(&[ModuleKind::BestPractices])
        };
        let reports = generate_earl_report(&evaluations(), Some(&options));
        let report = &reports[DEFAULT_AGGREGATED_NAME];
        assert_eq!(report.graph.len(), 2);
        assert!(report.graph.iter().all(|s| s.assertions.len() == 1));
    }

    #[test]
    fn test_json_ld_keys() {
        let reports = generate_earl_report(&evaluations(), None);
        let json = serde_json::to_value(&reports["https://b.test/"]).unwrap();
        assert_eq!(json["@graph"][0]["@type"], "TestSubject");
        assert_eq!(json["@graph"][0]["assertor"]["hasVersion"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["@graph"][0]["assertions"][0]["mode"], "earl:automatic");
    }
}

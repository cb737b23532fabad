use std::collections::BTreeMap;

use a11yforge_core::EvaluationReport;
use a11yforge_earl::EarlReport;
use serde::Serialize;

/// Reports of a run, keyed by URL (or by the aggregated name for EARL).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EvaluatorReport {
    Native(BTreeMap<String, EvaluationReport>),
    Earl(BTreeMap<String, EarlReport>),
}

impl EvaluatorReport {
    pub fn len(&self) -> usize {
        match self {
            EvaluatorReport::Native(reports) => reports.len(),
            EvaluatorReport::Earl(reports) => reports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

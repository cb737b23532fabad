use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The verdict of a single test performed by a rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Passed,
    Failed,
    Warning,
    Inapplicable,
}

/// The aggregated outcome of a rule over all of its test results.
///
/// Variants are ordered by severity so the worst outcome compares greatest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Inapplicable,
    Passed,
    Warning,
    Failed,
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Passed => Outcome::Passed,
            Verdict::Failed => Outcome::Failed,
            Verdict::Warning => Outcome::Warning,
            Verdict::Inapplicable => Outcome::Inapplicable,
        }
    }
}

impl Outcome {
    /// Human-readable summary used in rule metadata.
    pub fn description(&self) -> &'static str {
        match self {
            Outcome::Failed => "The test failed",
            Outcome::Warning => "The test requires manual verification",
            Outcome::Passed => "The test passed",
            Outcome::Inapplicable => "The test was not applicable",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Passed => write!(f, "passed"),
            Verdict::Failed => write!(f, "failed"),
            Verdict::Warning => write!(f, "warning"),
            Verdict::Inapplicable => write!(f, "inapplicable"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Verdict::from(*self).fmt(f)
    }
}

impl From<Outcome> for Verdict {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => Verdict::Passed,
            Outcome::Failed => Verdict::Failed,
            Outcome::Warning => Verdict::Warning,
            Outcome::Inapplicable => Verdict::Inapplicable,
        }
    }
}

/// The evaluation modules a page can be run through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleKind {
    #[serde(rename = "act-rules")]
    ActRules,
    #[serde(rename = "html-techniques")]
    HtmlTechniques,
    #[serde(rename = "css-techniques")]
    CssTechniques,
    #[serde(rename = "best-practices")]
    BestPractices,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 4] = [
        ModuleKind::ActRules,
        ModuleKind::HtmlTechniques,
        ModuleKind::CssTechniques,
        ModuleKind::BestPractices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::ActRules => "act-rules",
            ModuleKind::HtmlTechniques => "html-techniques",
            ModuleKind::CssTechniques => "css-techniques",
            ModuleKind::BestPractices => "best-practices",
        }
    }

    /// Short name accepted on the command line and in config files.
    pub fn short_name(&self) -> &'static str {
        match self {
            ModuleKind::ActRules => "act",
            ModuleKind::HtmlTechniques => "html",
            ModuleKind::CssTechniques => "css",
            ModuleKind::BestPractices => "bp",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ModuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower || kind.short_name() == lower)
            .ok_or_else(|| format!("unknown module '{s}'. Use 'act', 'html', 'css', or 'bp'"))
    }
}

pub mod error;
pub mod options;
pub mod report;
pub mod types;

pub use error::A11yError;
pub use options::{
    CrawlOptions, EvaluationOptions, ModulesToExecute, ResolutionOptions, RuleFilter,
    ViewportOptions, CUSTOM_HTML_URL,
};
pub use report::{
    Counts, DomInfo, ElementReport, EvaluationReport, ModuleReport, PageInfo, RuleMetadata,
    RuleReport, SuccessCriterion, SystemInfo, TestResult, UrlInfo, ViewportInfo,
};
pub use types::{ModuleKind, Outcome, Verdict};

//! The evaluation system: resolves inputs into pages, evaluates them in
//! parallel against the rule catalogue, and reports the results.

mod evaluator;
mod input;
mod output;
mod pipeline;

pub use evaluator::Evaluator;
pub use input::resolve_urls;
pub use output::EvaluatorReport;
pub use pipeline::{evaluate_page, PageSource};

pub use a11yforge_earl::EarlOptions;

//! HTML techniques (WCAG 2.1 sufficient techniques and failures).

mod t1;
mod t15;
mod t29;
mod t3;
mod t37;

use crate::rule::{Criterion, Rule};

pub use t1::QwHtmlT1;
pub use t15::QwHtmlT15;
pub use t29::QwHtmlT29;
pub use t3::QwHtmlT3;
pub use t37::QwHtmlT37;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(QwHtmlT1),
        Box::new(QwHtmlT3),
        Box::new(QwHtmlT15),
        Box::new(QwHtmlT29),
        Box::new(QwHtmlT37),
    ]
}

pub(crate) const SC_1_3_1: Criterion = Criterion {
    name: "1.3.1",
    level: "A",
    principle: "Perceivable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships",
};

//! ACT rules (W3C Accessibility Conformance Testing).

mod r1;
mod r11;
mod r12;
mod r17;
mod r2;
mod r20;
mod r4;
mod r5;

use crate::rule::{Criterion, Rule};

pub use r1::QwActR1;
pub use r11::QwActR11;
pub use r12::QwActR12;
pub use r17::QwActR17;
pub use r2::QwActR2;
pub use r20::QwActR20;
pub use r4::QwActR4;
pub use r5::QwActR5;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(QwActR1),
        Box::new(QwActR2),
        Box::new(QwActR4),
        Box::new(QwActR5),
        Box::new(QwActR11),
        Box::new(QwActR12),
        Box::new(QwActR17),
        Box::new(QwActR20),
    ]
}

pub(crate) const SC_1_1_1: Criterion = Criterion {
    name: "1.1.1",
    level: "A",
    principle: "Perceivable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/non-text-content",
};

pub(crate) const SC_2_4_2: Criterion = Criterion {
    name: "2.4.2",
    level: "A",
    principle: "Operable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/page-titled",
};

pub(crate) const SC_2_4_4: Criterion = Criterion {
    name: "2.4.4",
    level: "A",
    principle: "Operable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context",
};

pub(crate) const SC_3_1_1: Criterion = Criterion {
    name: "3.1.1",
    level: "A",
    principle: "Understandable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/language-of-page",
};

pub(crate) const SC_4_1_2: Criterion = Criterion {
    name: "4.1.2",
    level: "A",
    principle: "Robust",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/name-role-value",
};

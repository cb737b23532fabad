//! Best practices beyond the normative WCAG techniques.

mod bp1;
mod bp30;
mod bp32;
mod bp6;

use crate::rule::Rule;

pub use bp1::QwBp1;
pub use bp30::QwBp30;
pub use bp32::QwBp32;
pub use bp6::QwBp6;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(QwBp1),
        Box::new(QwBp6),
        Box::new(QwBp30),
        Box::new(QwBp32),
    ]
}

//! CSS techniques, evaluated over the mapped styles of each element.

mod t1;
mod t2;
mod t5;
mod t6;
mod t9;

use a11yforge_page::MappedDeclaration;

use crate::rule::{Criterion, Rule};

pub use t1::QwCssT1;
pub use t2::QwCssT2;
pub use t5::QwCssT5;
pub use t6::QwCssT6;
pub use t9::QwCssT9;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(QwCssT1),
        Box::new(QwCssT2),
        Box::new(QwCssT5),
        Box::new(QwCssT6),
        Box::new(QwCssT9),
    ]
}

pub(crate) const SC_1_4_4: Criterion = Criterion {
    name: "1.4.4",
    level: "AA",
    principle: "Perceivable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/resize-text",
};

pub(crate) const SC_1_4_8: Criterion = Criterion {
    name: "1.4.8",
    level: "AAA",
    principle: "Perceivable",
    url: "https://www.w3.org/WAI/WCAG21/Understanding/visual-presentation",
};

/// Lowercased value without `!important`.
pub(crate) fn normalized_value(declaration: &MappedDeclaration) -> String {
    declaration.specified().to_ascii_lowercase()
}

/// Split a CSS length such as `1.5em` into its number and unit.
pub(crate) fn split_number(value: &str) -> Option<(f64, &str)> {
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
        .map_or(value.len(), |(i, _)| i);
    let number = value[..end].parse::<f64>().ok()?;
    Some((number, value[end..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_number() {
        assert_eq!(split_number("1.5em"), Some((1.5, "em")));
        assert_eq!(split_number("150%"), Some((150.0, "%")));
        assert_eq!(split_number("-90deg"), Some((-90.0, "deg")));
        assert_eq!(split_number("2"), Some((2.0, "")));
        assert_eq!(split_number("large"), None);
    }
}

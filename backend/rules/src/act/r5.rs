use a11yforge_core::Verdict;
use a11yforge_page::{Element, Page};

use crate::rule::{Rule, RuleDefinition, RuleRecord};

use super::SC_3_1_1;

/// ISO 639-1 language codes.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

static DEFINITION: RuleDefinition = RuleDefinition {
    code: "QW-ACT-R5",
    name: "Validity of HTML Lang attribute",
    mapping: "bf051a",
    description: "This rule checks the lang attribute of the root element of the page has a valid primary language subtag.",
    target: "html[lang]",
    success_criteria: &[SC_3_1_1],
    related: &["H57"],
    url: "https://act-rules.github.io/rules/bf051a",
};

pub struct QwActR5;

impl Rule for QwActR5 {
    fn definition(&self) -> &'static RuleDefinition {
        &DEFINITION
    }

    fn execute(&self, element: Option<&Element<'_>>, _page: &Page, record: &mut RuleRecord) {
        let Some(html) = element else {
            return;
        };
        let Some(lang) = html.non_empty_attribute("lang") else {
            return;
        };
        if is_valid_language_tag(lang) {
            record.verdict(Verdict::Passed, "RC1", "The `lang` attribute has a valid value.", Some(html));
        } else {
            record.verdict(Verdict::Failed, "RC2", "The `lang` attribute doesn't have a valid value.", Some(html));
        }
    }
}

/// Checks the primary subtag of a BCP 47 language tag.
///
/// Two-letter subtags must be ISO 639-1 codes; three-letter (ISO 639-2/3)
/// subtags only need to be alphabetic.
fn is_valid_language_tag(tag: &str) -> bool {
    let primary = tag.split('-').next().unwrap_or_default().to_ascii_lowercase();
    if !primary.bytes().all(|b| b.is_ascii_alphabetic()) {
        return false;
    }
    match primary.len() {
        2 => ISO_639_1.contains(&primary.as_str()),
        3 => true,
        _ => false,
    }
}

//! Stylesheet abstract syntax tree.
//!
//! Tokenization and rule/declaration boundaries come from `cssparser`; this
//! module only keeps the raw text of selectors, preludes, and values. Parsing
//! is silent: a malformed rule is counted, logged at debug level, and skipped
//! so the rest of the stylesheet still maps onto the document.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, StyleSheetParser, Token,
};
use tracing::debug;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name
    pub property: String,
    /// Raw value text, including a trailing `!important`
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssRule {
    /// `selectors { declarations }`
    Style {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
    Media {
        media: String,
        rules: Vec<CssRule>,
    },
    Supports {
        condition: String,
        rules: Vec<CssRule>,
    },
    /// Any other block of nested rules (`@document`, `@container`, `@layer`, ...)
    Group {
        name: String,
        prelude: String,
        rules: Vec<CssRule>,
    },
    FontFace {
        declarations: Vec<Declaration>,
    },
    Page {
        selectors: Vec<String>,
        declarations: Vec<Declaration>,
    },
    Keyframes {
        name: String,
        /// Vendor prefix such as `-webkit-`, empty when unprefixed
        vendor: String,
    },
    Import {
        href: String,
    },
    Other {
        name: String,
        prelude: String,
    },
}

/// A parsed stylesheet with its source.
#[derive(Debug, Clone)]
pub struct ParsedStylesheet {
    /// Stylesheet URL, or `html{k}` for inline `<style>` elements
    pub file: String,
    pub plain: String,
    pub rules: Vec<CssRule>,
    /// Number of rules and declarations that were skipped as malformed
    pub errors: usize,
}

impl ParsedStylesheet {
    /// Hrefs of the top-level `@import` rules, in order.
    pub fn imports(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().filter_map(|rule| match rule {
            CssRule::Import { href } => Some(href.as_str()),
            _ => None,
        })
    }
}

/// Parse a stylesheet into its rule tree.
pub fn parse_stylesheet(file: &str, plain: &str) -> ParsedStylesheet {
    let mut input = ParserInput::new(plain);
    let mut parser = Parser::new(&mut input);
    let mut rule_parser = RuleListParser::default();
    let rules = rule_parser.parse_rule_list(&mut parser);

    if rule_parser.errors > 0 {
        debug!(file, errors = rule_parser.errors, "Skipped malformed CSS");
    }

    ParsedStylesheet {
        file: file.to_string(),
        plain: plain.to_string(),
        rules,
        errors: rule_parser.errors,
    }
}

/// Consume the rest of the input and return its trimmed source text.
fn consume_raw(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_string()
}

/// Split a selector list on its top-level commas.
///
/// Commas nested in functions such as `:is(a, b)` are not separators.
fn split_selector_list(input: &mut Parser<'_, '_>) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut start = input.position();
    loop {
        let before = input.position();
        let is_comma = match input.next_including_whitespace_and_comments() {
            Ok(token) => matches!(token, Token::Comma),
            Err(_) => {
                push_trimmed(&mut selectors, input.slice_from(start));
                break;
            }
        };
        if is_comma {
            push_trimmed(&mut selectors, input.slice(start..before));
            start = input.position();
        }
    }
    selectors
}

fn push_trimmed(out: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push(text.to_string());
    }
}

/// `url("a.css") screen` / `'a.css'` -> `a.css`
fn import_href(prelude: &str) -> String {
    let prelude = prelude.trim();
    let target = match prelude.get(..4) {
        Some(head) if head.eq_ignore_ascii_case("url(") => {
            let rest = &prelude[4..];
            rest.split(')').next().unwrap_or_default()
        }
        _ => prelude.split_whitespace().next().unwrap_or_default(),
    };
    target.trim().trim_matches(|c| c == '"' || c == '\'').to_string()
}

enum AtPrelude {
    Media(String),
    Supports(String),
    FontFace,
    Page(Vec<String>),
    Keyframes { name: String, vendor: String },
    Import(String),
    Group { name: String, prelude: String },
    Other { name: String, prelude: String },
}

#[derive(Default)]
struct RuleListParser {
    errors: usize,
}

impl RuleListParser {
    fn parse_rule_list(&mut self, input: &mut Parser<'_, '_>) -> Vec<CssRule> {
        let results: Vec<_> = StyleSheetParser::new(input, self).collect();
        let mut rules = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(rule) => rules.push(rule),
                Err((error, source)) => {
                    self.errors += 1;
                    debug!(error = ?error.kind, source, "Skipping malformed CSS rule");
                }
            }
        }
        rules
    }

    fn parse_declarations(&mut self, input: &mut Parser<'_, '_>) -> Vec<Declaration> {
        let mut declaration_parser = DeclarationListParser;
        let mut declarations = Vec::new();
        for result in RuleBodyParser::new(input, &mut declaration_parser) {
            match result {
                Ok(declaration) => declarations.push(declaration),
                Err((error, source)) => {
                    self.errors += 1;
                    debug!(error = ?error.kind, source, "Skipping malformed CSS declaration");
                }
            }
        }
        declarations
    }
}

impl<'i> QualifiedRuleParser<'i> for RuleListParser {
    type Prelude = Vec<String>;
    type QualifiedRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(split_selector_list(input))
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = self.parse_declarations(input);
        Ok(CssRule::Style {
            selectors,
            declarations,
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleListParser {
    type Prelude = AtPrelude;
    type AtRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let name = name.to_ascii_lowercase();
        let prelude = consume_raw(input);
        Ok(match name.as_str() {
            "media" => AtPrelude::Media(prelude),
            "supports" => AtPrelude::Supports(prelude),
            "font-face" => AtPrelude::FontFace,
            "page" => AtPrelude::Page(
                prelude
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            "import" => AtPrelude::Import(import_href(&prelude)),
            n if n.ends_with("keyframes") => AtPrelude::Keyframes {
                vendor: n.trim_end_matches("keyframes").to_string(),
                name: prelude,
            },
            "document" | "-moz-document" | "container" | "layer" | "scope" | "starting-style"
            | "host" => AtPrelude::Group { name, prelude },
            _ => AtPrelude::Other { name, prelude },
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        match prelude {
            AtPrelude::Import(href) => Ok(CssRule::Import { href }),
            // `@layer a, b;` declares order only
            AtPrelude::Group { name, prelude } | AtPrelude::Other { name, prelude } => {
                Ok(CssRule::Other { name, prelude })
            }
            _ => Err(()),
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let rule = match prelude {
            AtPrelude::Media(media) => CssRule::Media {
                media,
                rules: self.parse_rule_list(input),
            },
            AtPrelude::Supports(condition) => CssRule::Supports {
                condition,
                rules: self.parse_rule_list(input),
            },
            AtPrelude::Group { name, prelude } => CssRule::Group {
                name,
                prelude,
                rules: self.parse_rule_list(input),
            },
            AtPrelude::FontFace => CssRule::FontFace {
                declarations: self.parse_declarations(input),
            },
            AtPrelude::Page(selectors) => CssRule::Page {
                selectors,
                declarations: self.parse_declarations(input),
            },
            AtPrelude::Keyframes { name, vendor } => {
                consume_raw(input);
                CssRule::Keyframes { name, vendor }
            }
            AtPrelude::Import(href) => {
                consume_raw(input);
                CssRule::Import { href }
            }
            AtPrelude::Other { name, prelude } => {
                consume_raw(input);
                CssRule::Other { name, prelude }
            }
        };
        Ok(rule)
    }
}

/// Parses the contents of a `{ ... }` block as declarations only.
struct DeclarationListParser;

impl<'i> DeclarationParser<'i> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        Ok(Declaration {
            property: name.to_ascii_lowercase(),
            value: consume_raw(input),
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

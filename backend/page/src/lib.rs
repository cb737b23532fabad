//! Page snapshot model for a11yforge.
//!
//! Provides:
//! - HTML source parsing and stylesheet discovery (`source`)
//! - A CSS abstract syntax tree built on `cssparser` (`stylesheet`)
//! - The CSS-to-DOM mapping pass that annotates elements with the
//!   declarations that apply to them (`style_map`)
//! - Element helpers and WAI-ARIA utilities used by the rule catalogue

pub mod aria;
pub mod element;
pub mod page;
pub mod source;
pub mod style_map;
pub mod stylesheet;

pub use aria::{accessible_name, element_has_valid_role, element_role, implicit_role, is_aria_role};
pub use element::Element;
pub use page::Page;
pub use source::{inline_stylesheets, linked_stylesheet_urls, SourceHtml};
pub use style_map::{MappedDeclaration, StyleMap};
pub use stylesheet::{parse_stylesheet, CssRule, Declaration, ParsedStylesheet};

/// Node identifier of an element in the parsed document.
pub use ego_tree::NodeId;

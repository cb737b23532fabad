//! One page, from markup to report.
//!
//! Everything here is synchronous: the parsed document is not `Send`, so
//! it must never live across an `.await`.

use a11yforge_core::{EvaluationOptions, EvaluationReport, PageInfo, SystemInfo, UrlInfo, ViewportInfo};
use a11yforge_page::{inline_stylesheets, parse_stylesheet, Page, ParsedStylesheet, SourceHtml};
use a11yforge_rules::RuleModule;

/// Markup and external stylesheets of one page.
pub struct PageSource<'a> {
    /// Key of the report (the URL as requested, or `customHtml`)
    pub input_url: &'a str,
    /// URL the markup was served from
    pub page_url: &'a str,
    pub html: &'a str,
    pub stylesheets: &'a [(String, String)],
}

/// Parse, map styles, and run every given module.
pub fn evaluate_page(
    source: PageSource<'_>,
    viewport: ViewportInfo,
    modules: &[RuleModule],
    options: &EvaluationOptions,
) -> EvaluationReport {
    let html = SourceHtml::parse(source.html);
    let stylesheets = collect_stylesheets(&html, source.stylesheets);
    let page = Page::new(source.page_url, html, stylesheets, viewport.clone());

    let info = PageInfo {
        viewport,
        dom: page.dom_info(),
    };
    let mut report = EvaluationReport::new(SystemInfo::new(UrlInfo::parse(source.input_url), info));
    for module in modules {
        report.add_module(module.run(&page, options.filter_for(module.kind())));
    }
    report
}

/// External stylesheets first, then `<style>` elements in document order.
fn collect_stylesheets(html: &SourceHtml, external: &[(String, String)]) -> Vec<ParsedStylesheet> {
    let inline = inline_stylesheets(html.document());
    external
        .iter()
        .chain(inline.iter())
        .map(|(file, plain)| parse_stylesheet(file, plain))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11yforge_core::{ModuleKind, Outcome, CUSTOM_HTML_URL};
    use a11yforge_rules::catalogue;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>Shop</title>
    <style>p { text-align: justify; }</style>
    <style></style>
    <style>h1 { font-size: 2em; }</style>
  </head>
  <body><h1>Deals</h1><p class="lead">Cheap</p></body>
</html>"#;

    #[test]
    fn stylesheets_keep_discovery_order() {
        let html = SourceHtml::parse(PAGE);
        let external = vec![(
            "https://shop.test/site.css".to_string(),
            ".lead { line-height: 1 }".to_string(),
        )];
        let files: Vec<String> = collect_stylesheets(&html, &external)
            .into_iter()
            .map(|s| s.file)
            .collect();
        assert_eq!(files, vec!["https://shop.test/site.css", "html0", "html2"]);
    }

    #[test]
    fn report_carries_page_info_and_modules() {
        let modules = vec![catalogue(ModuleKind::CssTechniques)];
        let report = evaluate_page(
            PageSource {
                input_url: CUSTOM_HTML_URL,
                page_url: CUSTOM_HTML_URL,
                html: PAGE,
                stylesheets: &[],
            },
            ViewportInfo::default(),
            &modules,
            &EvaluationOptions::default(),
        );

        assert_eq!(report.system.url.input_url, CUSTOM_HTML_URL);
        assert_eq!(report.system.page.dom.title.as_deref(), Some("Shop"));
        assert_eq!(report.system.page.dom.stylesheet_count, 2);
        assert_eq!(report.modules.len(), 1);

        let css = &report.modules[&ModuleKind::CssTechniques];
        assert_eq!(css.assertions["QW-CSS-T2"].outcome(), Outcome::Failed);
        assert_eq!(css.assertions["QW-CSS-T1"].outcome(), Outcome::Passed);
    }
}

//! `a11yforge evaluate`: evaluate pages and print or save the report.

use std::path::{Path, PathBuf};

use a11yforge_config::A11yForgeConfig;
use a11yforge_core::{EvaluationOptions, EvaluationReport, ModuleKind};
use a11yforge_engine::{EarlOptions, Evaluator};
use a11yforge_rules::all_definitions;
use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use crate::config::Overrides;
use crate::terminal_output::{
    count_cell, note_error, note_info, note_success, note_warn, render_table, Column, GREEN, RED,
    YELLOW,
};

#[derive(Args, Debug, Default)]
pub struct EvaluateArgs {
    /// Page to evaluate (repeatable)
    #[arg(short, long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// File listing one URL per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Crawl this site and evaluate every page found
    #[arg(long, value_name = "URL")]
    pub crawl: Option<String>,

    /// Evaluate the markup of a local HTML file
    #[arg(long, value_name = "PATH")]
    pub html_file: Option<PathBuf>,

    /// Pages evaluated at once
    #[arg(short = 'p', long)]
    pub max_parallel: Option<usize>,

    /// Don't log pages that fail to load
    #[arg(long)]
    pub force: bool,

    /// Modules to run, comma separated (act, html, css, bp)
    #[arg(short, long, value_delimiter = ',')]
    pub modules: Vec<ModuleKind>,

    /// Rule codes to skip, comma separated
    #[arg(long, value_delimiter = ',', value_name = "CODES")]
    pub exclude: Vec<String>,

    /// Emulate a mobile device
    #[arg(long)]
    pub mobile: bool,

    /// Force landscape orientation
    #[arg(long, conflicts_with = "portrait")]
    pub landscape: bool,

    /// Force portrait orientation
    #[arg(long)]
    pub portrait: bool,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Output EARL (JSON-LD) instead of the native report
    #[arg(long)]
    pub earl: bool,

    /// Merge all pages into one EARL report
    #[arg(long, requires = "earl")]
    pub aggregated: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl EvaluateArgs {
    /// Flags that map onto config file settings.
    pub fn overrides(&self) -> Overrides {
        let mut overrides = Overrides::default();
        overrides.set_opt(&["evaluation", "maxParallelEvaluations"], self.max_parallel);
        if self.force {
            overrides.set(&["evaluation", "force"], true);
        }
        if !self.modules.is_empty() {
            for kind in ModuleKind::ALL {
                overrides.set(
                    &["evaluation", "modules", kind.short_name()],
                    self.modules.contains(&kind),
                );
            }
        }
        overrides.set_opt(&["browser", "userAgent"], self.user_agent.clone());
        if self.mobile {
            overrides.set(&["browser", "viewport", "mobile"], true);
        }
        if self.landscape || self.portrait {
            overrides.set(&["browser", "viewport", "landscape"], self.landscape);
        }
        overrides.set_opt(&["browser", "viewport", "width"], self.width);
        overrides.set_opt(&["browser", "viewport", "height"], self.height);
        overrides
    }

    async fn options(&self, config: &A11yForgeConfig) -> Result<EvaluationOptions> {
        let mut options = config.evaluation_options();
        let mut urls = self.urls.iter();
        options.url = urls.next().cloned();
        options.urls = urls.cloned().collect();
        options.file = self.file.as_ref().map(|path| path.display().to_string());
        options.crawl = self.crawl.clone();
        if let Some(path) = &self.html_file {
            let html = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read HTML file: {}", path.display()))?;
            options.html = Some(html);
        }
        exclude_rules(&mut options, &self.exclude)?;
        Ok(options)
    }
}

/// Route each excluded code to the filter of the module that owns it.
fn exclude_rules(options: &mut EvaluationOptions, codes: &[String]) -> Result<()> {
    let definitions = all_definitions();
    for code in codes {
        let Some((kind, definition)) = definitions
            .iter()
            .find(|(_, definition)| definition.code.eq_ignore_ascii_case(code))
        else {
            bail!("Unknown rule code '{code}'. Run `a11yforge rules` for the list");
        };
        let filter = match kind {
            ModuleKind::ActRules => &mut options.act_rules,
            ModuleKind::HtmlTechniques => &mut options.html_techniques,
            ModuleKind::CssTechniques => &mut options.css_techniques,
            ModuleKind::BestPractices => &mut options.best_practices,
        };
        filter.exclude.push(definition.code.to_string());
    }
    Ok(())
}

pub async fn run(args: EvaluateArgs, config: A11yForgeConfig) -> Result<()> {
    let options = args.options(&config).await?;
    let mut evaluator = Evaluator::http(config.browser.as_ref().unwrap_or(&Default::default()))?;

    evaluator.update(options).await?;
    note_info(&format!("Evaluating {} page(s)", evaluator.urls().len()));
    let result = evaluator.execute().await;
    evaluator.close().await?;
    result?;

    print_summary(evaluator.evaluations());
    for (url, message) in evaluator.failures() {
        note_warn(&format!("{url}: {message}"));
    }
    if evaluator.evaluations().is_empty() {
        bail!("No page could be evaluated");
    }

    let earl_options = args.aggregated.then(|| EarlOptions {
        aggregated: true,
        ..Default::default()
    });
    let report = evaluator.report(args.earl, earl_options.as_ref());
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    write_report(&json, args.output.as_deref()).await?;
    info!(reports = report.len(), earl = args.earl, "Report written");
    Ok(())
}

async fn write_report(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            note_success(&format!("Report saved to {}", path.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_summary<'a>(evaluations: impl IntoIterator<Item = (&'a String, &'a EvaluationReport)>) {
    let columns = [
        Column::left("Page").max_width(60),
        Column::right("Passed"),
        Column::right("Warning"),
        Column::right("Failed"),
        Column::right("Inapplicable"),
    ];
    let rows: Vec<Vec<String>> = evaluations
        .into_iter()
        .map(|(url, report)| {
            let counts = &report.metadata;
            vec![
                url.clone(),
                count_cell(counts.passed, GREEN),
                count_cell(counts.warning, YELLOW),
                count_cell(counts.failed, RED),
                counts.inapplicable.to_string(),
            ]
        })
        .collect();
    if rows.is_empty() {
        note_error("No reports to summarize");
        return;
    }
    eprint!("{}", render_table(&columns, &rows));
}

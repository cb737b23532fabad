use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use a11yforge_browser::{HttpPageLoader, PageLoader, ViewportSettings, DEFAULT_TIMEOUT};
use a11yforge_config::BrowserConfig;
use a11yforge_core::{A11yError, EvaluationOptions, EvaluationReport, CUSTOM_HTML_URL};
use a11yforge_earl::{generate_earl_report, EarlOptions};
use a11yforge_rules::{catalogue, RuleModule};
use anyhow::{anyhow, Result};
use logging::{EvaluationEvent, EventLogger};
use tokio::task::{Id, JoinSet};
use tracing::{debug, error, info, warn};

use crate::input::resolve_urls;
use crate::output::EvaluatorReport;
use crate::pipeline::{evaluate_page, PageSource};

/// Shared, read-only state of one run.
struct RunContext {
    loader: Arc<dyn PageLoader>,
    viewport: ViewportSettings,
    modules: Vec<RuleModule>,
    options: EvaluationOptions,
}

/// Evaluates a batch of pages and keeps their reports.
///
/// Call [`Evaluator::update`] with the inputs, [`Evaluator::execute`] to
/// evaluate, then [`Evaluator::report`].
pub struct Evaluator {
    loader: Arc<dyn PageLoader>,
    urls: Vec<String>,
    parallelism: usize,
    context: Option<Arc<RunContext>>,
    evaluations: BTreeMap<String, EvaluationReport>,
    failures: BTreeMap<String, String>,
}

impl Evaluator {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self {
            loader,
            urls: Vec::new(),
            parallelism: 1,
            context: None,
            evaluations: BTreeMap::new(),
            failures: BTreeMap::new(),
        }
    }

    /// Evaluator fetching pages over HTTP.
    pub fn http(config: &BrowserConfig) -> Result<Self> {
        let timeout = config
            .timeout_secs
            .map(std::time::Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Ok(Self::new(Arc::new(HttpPageLoader::new(timeout)?)))
    }

    /// Reset state and resolve the pages to evaluate.
    pub async fn update(&mut self, options: EvaluationOptions) -> Result<(), A11yError> {
        self.urls.clear();
        self.evaluations.clear();
        self.failures.clear();
        self.context = None;

        let mut parallelism = match options.max_parallel_evaluations {
            Some(0) => return Err(A11yError::InvalidParallelism(0)),
            Some(n) => n,
            None => 1,
        };

        let urls = resolve_urls(&options, &self.loader).await?;
        if urls.is_empty() {
            return Err(A11yError::InvalidInput("Invalid input method".to_string()));
        }
        parallelism = parallelism.min(urls.len());

        let modules = options
            .execute
            .unwrap_or_default()
            .enabled()
            .into_iter()
            .map(catalogue)
            .collect();
        let viewport = ViewportSettings::resolve(options.viewport.as_ref());

        info!(
            pages = urls.len(),
            parallelism,
            force = options.force,
            "Evaluation prepared"
        );
        self.urls = urls;
        self.parallelism = parallelism;
        self.context = Some(Arc::new(RunContext {
            loader: Arc::clone(&self.loader),
            viewport,
            modules,
            options,
        }));
        Ok(())
    }

    /// URLs that the next [`Evaluator::execute`] will evaluate.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Evaluate every page, `parallelism` at a time.
    ///
    /// A page that fails is recorded in [`Evaluator::failures`]; the run
    /// goes on with the remaining pages.
    pub async fn execute(&mut self) -> Result<(), A11yError> {
        let Some(context) = self.context.clone() else {
            return Err(A11yError::InvalidInput(
                "No evaluation prepared; call update first".to_string(),
            ));
        };

        let force = context.options.force;
        for chunk in self.urls.chunks(self.parallelism) {
            let mut join_set = JoinSet::new();
            let mut tasks: HashMap<Id, String> = HashMap::new();
            for url in chunk {
                let context = Arc::clone(&context);
                let task_url = url.clone();
                let handle = join_set.spawn(async move { evaluate_url(&context, &task_url).await });
                tasks.insert(handle.id(), url.clone());
            }

            while let Some(joined) = join_set.join_next_with_id().await {
                let (id, result) = match joined {
                    Ok((id, result)) => (id, result),
                    Err(e) => (e.id(), Err(anyhow!("Evaluation task aborted: {e}"))),
                };
                let Some(url) = tasks.remove(&id) else {
                    continue;
                };
                match result {
                    Ok(report) => {
                        self.evaluations.insert(url, report);
                    }
                    Err(e) => record_failure(&mut self.failures, force, url, format!("{e:#}")),
                }
            }
        }

        info!(
            evaluated = self.evaluations.len(),
            failed = self.failures.len(),
            "Evaluation finished"
        );
        Ok(())
    }

    /// Native reports, or their EARL translation when `earl` is set or
    /// EARL options are given.
    pub fn report(&self, earl: bool, earl_options: Option<&EarlOptions>) -> EvaluatorReport {
        if earl || earl_options.is_some() {
            EvaluatorReport::Earl(generate_earl_report(&self.evaluations, earl_options))
        } else {
            EvaluatorReport::Native(self.evaluations.clone())
        }
    }

    pub fn evaluations(&self) -> &BTreeMap<String, EvaluationReport> {
        &self.evaluations
    }

    /// URL → error message for pages that could not be evaluated.
    pub fn failures(&self) -> &BTreeMap<String, String> {
        &self.failures
    }

    /// Release the page loader.
    pub async fn close(&self) -> Result<()> {
        debug!(loader = self.loader.name(), "Closing page loader");
        self.loader.close().await
    }
}

fn record_failure(failures: &mut BTreeMap<String, String>, force: bool, url: String, message: String) {
    if !force {
        error!(url = %url, error = %message, "Page evaluation failed");
    }
    EventLogger::log_event(EvaluationEvent::PageFailed {
        url: url.clone(),
        error: message.clone(),
    });
    failures.insert(url, message);
}

async fn evaluate_url(context: &RunContext, url: &str) -> Result<EvaluationReport> {
    let started = Instant::now();
    let options = &context.options;
    let viewport = context.viewport.info();

    let report = if url == CUSTOM_HTML_URL {
        let html = options.html.as_deref().unwrap_or_default();
        evaluate_page(
            PageSource {
                input_url: url,
                page_url: url,
                html,
                stylesheets: &[],
            },
            viewport,
            &context.modules,
            options,
        )
    } else {
        let loaded = context
            .loader
            .load(url, &context.viewport)
            .await
            .map_err(|e| A11yError::PageLoad {
                url: url.to_string(),
                message: format!("{e:#}"),
            })?;
        EventLogger::log_event(EvaluationEvent::PageLoaded {
            url: url.to_string(),
            status: loaded.status,
            stylesheets: loaded.stylesheets.len(),
        });
        if loaded.url != url {
            warn!(url = %url, final_url = %loaded.url, "Page was redirected");
        }
        evaluate_page(
            PageSource {
                input_url: url,
                page_url: &loaded.url,
                html: &loaded.html,
                stylesheets: &loaded.stylesheets,
            },
            viewport,
            &context.modules,
            options,
        )
    };

    let counts = &report.metadata;
    EventLogger::log_event(EvaluationEvent::PageEvaluated {
        url: url.to_string(),
        passed: counts.passed,
        warning: counts.warning,
        failed: counts.failed,
        inapplicable: counts.inapplicable,
        duration_ms: started.elapsed().as_millis() as u64,
    });
    Ok(report)
}

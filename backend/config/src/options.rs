//! Conversion of the prepared config into evaluation inputs.

use a11yforge_core::{
    CrawlOptions, EvaluationOptions, ModuleKind, ModulesToExecute, ResolutionOptions, RuleFilter,
    ViewportOptions,
};

use crate::schema::{A11yForgeConfig, RuleFilterConfig, RulesConfig};

impl A11yForgeConfig {
    /// Evaluation options carrying the configured defaults; inputs (urls,
    /// html, crawl start) are left for the caller.
    pub fn evaluation_options(&self) -> EvaluationOptions {
        let mut options = EvaluationOptions {
            crawl_options: self.crawl_options(),
            viewport: self.viewport_options(),
            ..Default::default()
        };
        let Some(evaluation) = &self.evaluation else {
            return options;
        };

        options.max_parallel_evaluations = evaluation.max_parallel_evaluations;
        options.force = evaluation.force.unwrap_or(false);
        if let Some(modules) = &evaluation.modules {
            let mut execute = ModulesToExecute::default();
            for (kind, flag) in [
                (ModuleKind::ActRules, modules.act),
                (ModuleKind::HtmlTechniques, modules.html),
                (ModuleKind::CssTechniques, modules.css),
                (ModuleKind::BestPractices, modules.bp),
            ] {
                execute.set(kind, flag.unwrap_or(true));
            }
            options.execute = Some(execute);
        }
        if let Some(rules) = &evaluation.rules {
            for kind in ModuleKind::ALL {
                let filter = rule_filter(rules, kind);
                match kind {
                    ModuleKind::ActRules => options.act_rules = filter,
                    ModuleKind::HtmlTechniques => options.html_techniques = filter,
                    ModuleKind::CssTechniques => options.css_techniques = filter,
                    ModuleKind::BestPractices => options.best_practices = filter,
                }
            }
        }
        options
    }

    pub fn crawl_options(&self) -> CrawlOptions {
        let defaults = CrawlOptions::default();
        let Some(crawler) = &self.crawler else {
            return defaults;
        };
        CrawlOptions {
            max_depth: crawler.max_depth.unwrap_or(defaults.max_depth),
            max_urls: crawler.max_urls,
            max_parallel_crawls: crawler
                .max_parallel_crawls
                .unwrap_or(defaults.max_parallel_crawls),
            timeout_secs: crawler.timeout_secs,
        }
    }

    /// `None` when nothing about the viewport is configured.
    pub fn viewport_options(&self) -> Option<ViewportOptions> {
        let browser = self.browser.as_ref()?;
        let user_agent = browser
            .user_agent
            .as_ref()
            .filter(|ua| !ua.trim().is_empty())
            .cloned();
        if browser.viewport.is_none() && user_agent.is_none() {
            return None;
        }
        let viewport = browser.viewport.clone().unwrap_or_default();
        let resolution = (viewport.width.is_some() || viewport.height.is_some()).then_some(
            ResolutionOptions {
                width: viewport.width,
                height: viewport.height,
            },
        );
        Some(ViewportOptions {
            mobile: viewport.mobile.unwrap_or(false),
            landscape: viewport.landscape,
            user_agent,
            resolution,
        })
    }
}

fn rule_filter(rules: &RulesConfig, kind: ModuleKind) -> RuleFilter {
    let config = match kind {
        ModuleKind::ActRules => &rules.act,
        ModuleKind::HtmlTechniques => &rules.html,
        ModuleKind::CssTechniques => &rules.css,
        ModuleKind::BestPractices => &rules.bp,
    };
    config
        .as_ref()
        .map(|RuleFilterConfig { rules, exclude }| RuleFilter {
            rules: rules.clone(),
            exclude: exclude.clone(),
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;

    #[test]
    fn defaults_run_every_module() {
        let cfg = apply_all_defaults(A11yForgeConfig::default());
        let options = cfg.evaluation_options();
        assert_eq!(options.execute, Some(ModulesToExecute::default()));
        assert_eq!(options.max_parallel_evaluations, Some(5));
        assert_eq!(options.crawl_options, CrawlOptions::default());
        assert!(options.viewport.is_none());
    }

    #[test]
    fn yaml_maps_to_options() {
        let yaml = r#"
browser:
  userAgent: "probe"
  viewport:
    mobile: true
    width: 400
evaluation:
  force: true
  modules:
    html: false
  rules:
    bp:
      rules: ["QW-BP1"]
crawler:
  maxDepth: 3
  maxUrls: 20
"#;
        let cfg: A11yForgeConfig = serde_yaml::from_str(yaml).unwrap();
        let options = cfg.evaluation_options();
        assert!(options.force);
        let execute = options.execute.unwrap();
        assert!(!execute.html);
        assert!(execute.css);
        assert!(options.best_practices.allows("qw-bp1"));
        assert!(!options.best_practices.allows("QW-BP6"));
        assert!(options.act_rules.allows("QW-ACT-R1"));
        assert_eq!(options.crawl_options.max_depth, 3);
        assert_eq!(options.crawl_options.max_urls, Some(20));

        let viewport = options.viewport.unwrap();
        assert!(viewport.mobile);
        assert_eq!(viewport.user_agent.as_deref(), Some("probe"));
        assert_eq!(viewport.resolution.unwrap().width, Some(400));
        assert_eq!(viewport.resolution.unwrap().height, None);
    }
}

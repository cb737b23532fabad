mod config;
mod config_cmd;
mod crawl_cmd;
mod evaluate_cmd;
mod rules_cmd;
mod terminal_output;

use std::path::PathBuf;
use std::process::ExitCode;

use a11yforge_config::validate;
use anyhow::Result;
use clap::{Parser, Subcommand};
use logging::init_logger;
use tracing::error;

use config::Overrides;
use terminal_output::{note_error, note_warn};

#[derive(Parser)]
#[command(name = "a11yforge")]
#[command(about = "a11yforge: automated web accessibility evaluation")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.a11yforge/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter when RUST_LOG is unset
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate pages and report the results
    Evaluate(evaluate_cmd::EvaluateArgs),
    /// List the pages of a site
    Crawl(crawl_cmd::CrawlArgs),
    /// List the rule catalogue
    Rules(rules_cmd::RulesArgs),
    /// Show the effective config or write a default one
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let mut overrides = match &self.command {
            Commands::Evaluate(args) => args.overrides(),
            Commands::Crawl(args) => args.overrides(),
            Commands::Rules(_) | Commands::Config(_) => Overrides::default(),
        };
        overrides.set_opt(&["logging", "level"], self.log_level.clone());
        if self.log_json {
            overrides.set(&["logging", "json"], true);
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Command failed");
            note_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref(), cli.overrides()).await?;
    init_logger(&config::logger_options(&config))?;
    for warning in validate(&config).warnings {
        note_warn(&warning.to_string());
    }

    match cli.command {
        Commands::Evaluate(args) => evaluate_cmd::run(args, config).await,
        Commands::Crawl(args) => crawl_cmd::run(args, config).await,
        Commands::Rules(args) => rules_cmd::run(args),
        Commands::Config(args) => config_cmd::run(args, cli.config.as_deref(), config).await,
    }
}

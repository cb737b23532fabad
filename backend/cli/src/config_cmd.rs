//! `a11yforge config`: show or initialize the configuration.

use std::path::Path;

use a11yforge_config::{apply_all_defaults, write_config, A11yForgeConfig};
use anyhow::{bail, Context, Result};
use clap::Args;

use crate::config::config_path;
use crate::terminal_output::{note_info, note_success};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write a config file with the default values
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub overwrite: bool,
}

pub async fn run(args: ConfigArgs, explicit: Option<&Path>, config: A11yForgeConfig) -> Result<()> {
    let path = config_path(explicit);
    if args.init {
        if path.exists() && !args.overwrite {
            bail!(
                "{} already exists; pass --overwrite to replace it",
                path.display()
            );
        }
        write_config(&apply_all_defaults(A11yForgeConfig::default()), &path).await?;
        note_success(&format!("Wrote default config to {}", path.display()));
        return Ok(());
    }

    note_info(&format!("Effective config ({})", path.display()));
    let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;
    print!("{yaml}");
    Ok(())
}

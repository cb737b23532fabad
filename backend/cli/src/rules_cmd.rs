//! `a11yforge rules`: list the rule catalogue.

use a11yforge_core::ModuleKind;
use a11yforge_rules::{all_definitions, RuleDefinition};
use anyhow::Result;
use clap::Args;

use crate::terminal_output::{render_table, Column};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list the rules of this module
    #[arg(short, long)]
    pub module: Option<ModuleKind>,

    /// Print the rule definitions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RulesArgs) -> Result<()> {
    let rules = select(args.module);
    if args.json {
        let definitions: Vec<&RuleDefinition> = rules.iter().map(|(_, def)| *def).collect();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    let columns = [
        Column::left("Code"),
        Column::left("Module"),
        Column::left("Mapping"),
        Column::left("Name").max_width(70),
    ];
    let rows: Vec<Vec<String>> = rules
        .iter()
        .map(|(kind, def)| {
            vec![
                def.code.to_string(),
                kind.short_name().to_string(),
                def.mapping.to_string(),
                def.name.to_string(),
            ]
        })
        .collect();
    print!("{}", render_table(&columns, &rows));
    Ok(())
}

fn select(module: Option<ModuleKind>) -> Vec<(ModuleKind, &'static RuleDefinition)> {
    all_definitions()
        .into_iter()
        .filter(|(kind, _)| module.map_or(true, |m| m == *kind))
        .collect()
}

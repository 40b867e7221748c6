// ============================================================
// Command-line interface
// ============================================================
// Parses flags with clap, builds a CalculationItem, evaluates it
// with fincalc_core and prints either a text report or JSON.
// The CLI only routes and renders; every number comes from the core.

pub mod commands;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use commands::{Commands, EvalArgs};
use fincalc_core::calculations::{evaluate, CalculationItem};
use fincalc_core::Settings;

use crate::render::render;

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    version,
    about = "Personal finance calculators: loans, APR, FIRE, retirement, FX, oil, tax and more."
)]
pub struct Cli {
    /// Print results (and errors) as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML settings file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let settings = load_settings(self.config.as_deref())?;

        let item = match self.command {
            Commands::Eval(args) => read_item(&args)?,
            command => match command.into_item() {
                Some(item) => item,
                None => anyhow::bail!("subcommand does not describe a calculation"),
            },
        };

        tracing::info!(calc_type = item.calc_type(), "running calculation");
        let output = evaluate(&item, &settings)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print!("{}", render(&output, item.label(), &settings.display));
        }
        Ok(())
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

fn read_item(args: &EvalArgs) -> Result<CalculationItem> {
    let text = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("reading calculation from stdin")?;
        buffer
    } else {
        fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?
    };
    Ok(CalculationItem::from_json(&text)?)
}

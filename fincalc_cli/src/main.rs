//! # FinCalc CLI Application
//!
//! Command-line front end for the `fincalc_core` calculators. Every
//! calculator is a subcommand; `eval` runs a tagged JSON document.
//!
//! ```text
//! fincalc loan --principal 300000 --apr 7 --years 30
//! fincalc --json apr --amount 300000 --rate 7 --years 30 --fees 6000
//! echo '{"type":"Tax","gross_income":100000}' | fincalc eval -
//! ```

mod cli;
mod render;

use std::process::ExitCode;

use clap::Parser;
use fincalc_core::CalcError;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "fincalc=debug" } else { "fincalc=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Structured errors go to stdout as JSON when `--json` is set.
fn report_error(err: &anyhow::Error, json: bool) {
    match err.downcast_ref::<CalcError>() {
        Some(calc_error) if json => match serde_json::to_string_pretty(calc_error) {
            Ok(text) => println!("{}", text),
            Err(_) => eprintln!("Error: {}", calc_error),
        },
        _ => eprintln!("Error: {:#}", err),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

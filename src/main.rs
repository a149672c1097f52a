use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod config;
mod emit;
mod error;
mod extract;
mod literal;
mod pattern;
mod prompt;
mod reference;
mod resolve;
mod script;

use cli::RootArgs;
use config::{load_profile, validate_config, ExtractorConfig};
use extract::{run_extract, RunSummary};
use prompt::{Disabled, LinePrompt};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    let config = build_config(&args)?;
    validate_config(&config)?;

    let summary = if config.interactive {
        let stdin = io::stdin();
        let mut prompt = LinePrompt::new(stdin.lock(), console(args.json));
        run_extract(&config, &args.files, &mut prompt, &mut console(args.json))?
    } else {
        run_extract(&config, &args.files, &mut Disabled, &mut console(args.json))?
    };

    report(&summary, args.json)
}

/// Operator-facing stream. With `--json`, stdout carries only the summary.
fn console(json: bool) -> Box<dyn Write> {
    if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &RootArgs) -> Result<ExtractorConfig> {
    let mut config = ExtractorConfig::new(args.page_id);
    if let Some(path) = &args.config {
        config = config.with_profile(load_profile(path)?);
    }
    if let Some(marker) = &args.marker {
        config.marker = marker.clone();
    }
    config.output = args.output.clone();
    config.reference = args.source_html.clone();
    config.interactive = args.interactive;
    Ok(config)
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }
    let Some(output) = &summary.output else {
        println!("No literals found in the given files.");
        return Ok(());
    };
    println!(
        "Found {} literals: {} from reference, {} from operator, {} without value.",
        summary.literals_found, summary.from_reference, summary.from_operator, summary.unresolved
    );
    if summary.files_skipped > 0 {
        println!("Skipped {} unreadable file(s).", summary.files_skipped);
    }
    println!("Done. Review the file '{}'.", output.display());
    Ok(())
}

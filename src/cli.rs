//! CLI argument parsing.
//!
//! The CLI only gathers inputs; everything it accepts is folded into one
//! immutable configuration before any template is read.
use crate::config::DEFAULT_OUTPUT;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "literal-extractor",
    version,
    about = "Extract page literals and, optionally, their default values from a rendered reference page",
    after_help = "Examples:\n  literal-extractor -p 12 Views/Home/Index.cshtml\n  literal-extractor -p 12 -s index.html -o home.sql Views/Home/Index.cshtml\n  literal-extractor -p 12 -s index.html -i Views/Home/*.cshtml",
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Template files to scan for literal call-sites
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Page id written into every LiteralKey insert
    #[arg(short, long, value_name = "ID")]
    pub page_id: i64,

    /// Output path for the generated SQL script
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Prompt for a value when none is found
    #[arg(short, long)]
    pub interactive: bool,

    /// Rendered reference HTML used to recover default values
    #[arg(short, long, value_name = "PATH")]
    pub source_html: Option<PathBuf>,

    /// JSON profile with the call-site marker and schema constants
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Call-site marker preceding the literal key (overrides the profile)
    #[arg(long, value_name = "TEXT")]
    pub marker: Option<String>,

    /// Emit a machine-readable run summary
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

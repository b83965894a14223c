//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the final outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with the final draft
    Text,
    /// JSON outcome (draft, report, iterations)
    Json,
}

/// CLI arguments for code-reviewer
#[derive(Parser, Debug)]
#[command(name = "code-reviewer")]
#[command(author, version, about = "Writer/reviewer loop - draft a file until it passes review")]
#[command(long_about = r#"
code-reviewer drafts one file with a writer model and checks it against your
coding rules with a panel of reviewer models, looping until the review is
clean or the iteration budget is spent.

Each iteration:
1. Write: the writer model produces the complete file, guided by the last review
2. Review: two reviewer models check the draft; a collator merges their findings

Configuration files are loaded from (in priority order):
1. CODE_REVIEWER_* environment variables (e.g. CODE_REVIEWER_SUPERVISOR__MAX_ITERATIONS)
2. --config <path>          Explicit config file
3. ./code-reviewer.toml     Project-level config
4. ~/.config/code-reviewer/config.toml   Global config

Exit status: 0 compliant, 2 budget exhausted with violations left, 1 error.

Example:
  code-reviewer src/app.py --instructions "Add type hints to every function"
  code-reviewer src/new.py -i "Create a CSV parser" --context src/models.py --write
  code-reviewer src/app.py -i "Refactor" --max-iterations 4 --output json
"#)]
pub struct Cli {
    /// File to create or modify
    pub path: Option<PathBuf>,

    /// What the writer should do with the file
    #[arg(short, long, value_name = "TEXT")]
    pub instructions: Option<String>,

    /// Read-only reference files (can be specified multiple times)
    #[arg(short, long, value_name = "PATH")]
    pub context: Vec<PathBuf>,

    /// Maximum writer calls (0 = single write/review pass)
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u32>,

    /// Per-call timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Model that writes the draft
    #[arg(long, value_name = "MODEL")]
    pub writer_model: Option<String>,

    /// Reviewer models (can be specified multiple times; replaces the configured routes)
    #[arg(long, value_name = "MODEL")]
    pub reviewer_model: Vec<String>,

    /// Model that consolidates the reviewers' findings
    #[arg(long, value_name = "MODEL")]
    pub collator_model: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write the final draft to PATH when the review is compliant
    #[arg(short, long)]
    pub write: bool,

    /// Append a JSONL transcript of the run to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Tracing filter directive for the `-v` count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

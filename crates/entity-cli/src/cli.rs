//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "entityidentity",
    version,
    about = "Resolve company names to canonical reference records",
    long_about = "Resolve free-text company names against a reference database.\n\n\
                  Names are normalized (case, punctuation, legal suffixes), matched\n\
                  against a bounded candidate set and scored; each resolution is\n\
                  accepted, ambiguous or rejected."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Reference data file (csv, json, jsonl, ndjson). Repeat to load several.
    #[arg(long = "data", value_name = "PATH", global = true)]
    pub data: Vec<PathBuf>,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the normalized comparison key of each name.
    Normalize(NormalizeArgs),

    /// List reference companies, optionally filtered.
    List(ListArgs),

    /// Print the accepted match for a name, or "no match".
    Match(MatchArgs),

    /// Resolve a name and show the decision with scored candidates.
    Resolve(ResolveArgs),

    /// Show reference database statistics.
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Names to normalize.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only companies in this country (ISO code, case-insensitive).
    #[arg(long = "country", value_name = "CODE")]
    pub country: Option<String>,

    /// Case-insensitive substring of the company name.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Maximum number of companies to print.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct MatchArgs {
    /// Company name to match.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Country hint (ISO code).
    #[arg(long = "country", value_name = "CODE")]
    pub country: Option<String>,

    /// Print JSON (`null` when there is no match).
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Company name to resolve.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Country hint (ISO code).
    #[arg(long = "country", value_name = "CODE")]
    pub country: Option<String>,

    /// Print the full result as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Number of candidates to show in the table.
    #[arg(long = "top", value_name = "N", default_value_t = 5)]
    pub top: usize,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI argument definitions for the crosswalk tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use crosswalk_model::SourceSystem;

#[derive(Parser)]
#[command(
    name = "crosswalk",
    version,
    about = "Terminology crosswalk - map traditional-medicine vocabularies to ICD-11",
    long_about = "Normalize Ayurveda, Siddha and Unani vocabularies into one corpus,\n\
                  predict matching terms from clinical text, and suggest or apply\n\
                  ICD-11 (including TM2) mappings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path of each log event.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow clinical text to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Engine configuration file (TOML).
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the vocabulary CSV files.
    #[arg(long = "resources-dir", value_name = "DIR", global = true)]
    pub resources_dir: Option<PathBuf>,

    /// Classification catalog (JSON array of entries) used for suggestions.
    #[arg(long = "catalog", value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// Print results as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load vocabularies and print load outcomes and corpus counts.
    Stats,

    /// Rank vocabulary terms against free clinical text.
    Predict(PredictArgs),

    /// Substring search over codes, terms, descriptions and categories.
    Search(SearchArgs),

    /// Suggest ICD-11 mappings for a term.
    Suggest(SuggestArgs),

    /// Auto-map a vocabulary and print its mapping report.
    Automap(AutomapArgs),
}

#[derive(Parser)]
pub struct PredictArgs {
    /// Clinical text to match.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Number of predictions to return.
    #[arg(long = "top-k", default_value_t = 3)]
    pub top_k: usize,
}

#[derive(Parser)]
pub struct SearchArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict to these vocabularies (repeatable).
    #[arg(long = "source", value_name = "SOURCE", value_parser = parse_source)]
    pub sources: Vec<SourceSystem>,

    #[arg(long = "limit")]
    pub limit: Option<usize>,

    /// Also print mapping suggestions for each hit.
    #[arg(long = "suggest")]
    pub suggest: bool,
}

#[derive(Parser)]
pub struct SuggestArgs {
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Source code of the term, used in logs.
    #[arg(long = "code", default_value = "")]
    pub code: String,
}

#[derive(Parser)]
pub struct AutomapArgs {
    #[arg(value_name = "SOURCE", value_parser = parse_source)]
    pub source: SourceSystem,

    /// Write the mapped vocabulary back to its resource file.
    #[arg(long = "write")]
    pub write: bool,
}

pub fn parse_source(value: &str) -> Result<SourceSystem, String> {
    value.parse()
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "caai-logbook",
    version,
    about = "CAAI logbook toolkit - normalize flight logs and fill the tofes-shaot",
    long_about = "Convert flight logbooks from any common format (Excel, CSV, TSV, \
                  LogTen export) into normalized records, classify them under the \
                  CAAI role rules, and fill the flight-hours summary form."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Convert any logbook source into a normalized CSV logbook.
    Import(ImportArgs),

    /// Categorize a logbook per the CAAI rules and print the totals.
    Analyze(SourceArgs),

    /// Fill the tofes-shaot form from a logbook source.
    Form(FormArgs),

    /// List the canonical logbook fields and their known header aliases.
    Fields,
}

#[derive(Parser)]
pub struct SourceArgs {
    /// Logbook source file (.xlsx, .xls, .csv, .tsv, or .txt).
    #[arg(value_name = "SOURCE")]
    pub input: PathBuf,

    /// Force the source format instead of auto-detecting.
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Explicit column mapping file (TOML with a [columns] table).
    #[arg(long = "mapping", short = 'm', value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Additional airports as JSON (code -> [lat, lon]) for leg distances.
    #[arg(long = "airports", value_name = "PATH")]
    pub airports: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output CSV path for the normalized logbook.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct FormArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output path for the filled form workbook.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the run report and form values as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Excel,
    Csv,
    Tsv,
    Logten,
}

impl From<FormatArg> for caai_ingest::SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Excel => caai_ingest::SourceFormat::Excel,
            FormatArg::Csv => caai_ingest::SourceFormat::Csv,
            FormatArg::Tsv => caai_ingest::SourceFormat::Tsv,
            FormatArg::Logten => caai_ingest::SourceFormat::LogTen,
        }
    }
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

//! CLI argument definitions for the catalog converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "icat",
    version,
    about = "Intervention catalog converter - nested JSON to dual CSVs and back",
    long_about = "Convert hospital-intervention carbon catalogs between the nested\n\
                  JSON envelope and the flat groups/interventions CSV pair.\n\n\
                  Flattening writes custom equivalency coefficients to a .equiv.json\n\
                  sidecar next to the interventions CSV; unflattening reads the\n\
                  sidecar back when present."
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
    /// Convert a catalog JSON file to groups.csv + interventions.csv.
    JsonToCsv(JsonToCsvArgs),

    /// Convert groups.csv + interventions.csv back to catalog JSON.
    CsvToJson(CsvToJsonArgs),
}

#[derive(Parser)]
pub struct JsonToCsvArgs {
    /// Path to the catalog JSON file.
    #[arg(long = "json", value_name = "PATH")]
    pub json: PathBuf,

    /// Output groups CSV path.
    #[arg(long = "groups-out", value_name = "PATH", default_value = "groups.csv")]
    pub groups_out: PathBuf,

    /// Output interventions CSV path.
    #[arg(
        long = "interventions-out",
        value_name = "PATH",
        default_value = "interventions.csv"
    )]
    pub interventions_out: PathBuf,
}

#[derive(Parser)]
pub struct CsvToJsonArgs {
    /// Path to the groups CSV.
    #[arg(long = "groups", value_name = "PATH")]
    pub groups: PathBuf,

    /// Path to the interventions CSV.
    #[arg(long = "interventions", value_name = "PATH")]
    pub interventions: PathBuf,

    /// Output catalog JSON path.
    #[arg(
        long = "json-out",
        value_name = "PATH",
        default_value = "interventions.json"
    )]
    pub json_out: PathBuf,

    /// Equivalency-coefficient JSON file to embed in the output.
    ///
    /// When omitted, a sidecar discovered next to the interventions CSV is
    /// used, falling back to the built-in defaults.
    #[arg(long = "equiv", value_name = "PATH")]
    pub equiv: Option<PathBuf>,
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

//! CLI argument definitions for the FHIR converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fhir_codec::WireFormat;

#[derive(Parser)]
#[command(
    name = "fhir",
    version,
    about = "Convert and check FHIR resources in JSON and XML",
    long_about = "Convert FHIR resources between the JSON and XML wire formats.\n\n\
                  Primitive metadata, choice fields and contained resources are\n\
                  carried across both notations."
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
    /// Decode a resource and re-encode it in another format.
    Convert(ConvertArgs),

    /// Decode resource files and report which ones fail.
    Check(CheckArgs),

    /// List the resource types the decoder recognizes.
    Types,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Resource file to read.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (default: from extension, then content).
    #[arg(long = "from", value_enum)]
    pub from: Option<FormatArg>,

    /// Output format.
    #[arg(long = "to", value_enum)]
    pub to: FormatArg,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Indent the output.
    #[arg(long = "pretty")]
    pub pretty: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Resource files to decode.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for WireFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => WireFormat::Json,
            FormatArg::Xml => WireFormat::Xml,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
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

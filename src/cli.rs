//! CLI argument parsing for speedboard

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Format of the report printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width tables and headline sentences (default)
    Text,
    /// Tripwire JSON
    Json,
    /// Speed table as CSV
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "speedboard")]
#[command(version)]
#[command(
    about = "Compare benchmark results across interpreter configurations",
    long_about = None
)]
pub struct Cli {
    /// JSON sample store with timings, memory and JIT counters
    #[arg(short, long, value_name = "FILE")]
    pub samples: PathBuf,

    /// TOML comparison config (role table, fallback platform, canvas size)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// TOML benchmark metadata, overlaid on the built-in table
    #[arg(short, long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Platform to compare (repeatable; default: every platform in the store)
    #[arg(short, long = "platform", value_name = "NAME")]
    pub platforms: Vec<String>,

    /// Restrict the comparison to these benchmarks (repeatable)
    #[arg(short, long = "benchmark", value_name = "NAME")]
    pub benchmarks: Vec<String>,

    /// Output format for stdout
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write per-platform tripwires, tables and charts into this directory
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Enable debug tracing output (to stderr)
    #[arg(long = "debug")]
    pub debug: bool,
}

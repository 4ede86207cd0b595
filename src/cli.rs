//! CLI argument parsing for abstats

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "abstats")]
#[command(version)]
#[command(
    about = "A/B test execution data (from <tag, score> csv file)",
    long_about = None
)]
pub struct Cli {
    /// Input file: csv with <tag, score> rows and exactly two tags. The first
    /// tag in the file is the "old" tag when checking for a regression.
    /// Reads stdin when omitted or "-".
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: Option<PathBuf>,

    /// Increase output verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Load analysis options from a TOML file (flags override it)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Confidence level (e.g. 0.999 to be 99.9% confident of all reported values)
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<f64>,

    /// Maximum allowed execution regression (e.g. 0.02: B within 2% of A)
    #[arg(long = "max-regression", value_name = "FRACTION")]
    pub max_regression: Option<f64>,

    /// Maximum confidence interval width as a fraction of the sample mean
    #[arg(long = "max-interval-percent", value_name = "FRACTION")]
    pub max_interval_percent: Option<f64>,

    /// Number of histogram buckets to use
    #[arg(long = "histogram-buckets", value_name = "N")]
    pub histogram_buckets: Option<usize>,

    /// Unit to use when displaying values (e.g. "ms")
    #[arg(long = "display-unit", value_name = "UNIT", default_value = "")]
    pub display_unit: String,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

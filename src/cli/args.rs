use crate::output::OutputFormat;
use clap::Parser;

/// Command-line arguments for values-checker
#[derive(Parser, Debug, Clone)]
#[command(name = "values-checker")]
#[command(about = "Validate values files against a chart's defaults and values schema")]
#[command(
    long_about = "Validate one or more values files against a chart's defaults and optional values schema.\n\n\
    Checks performed:\n  \
    - Unknown keys (keys not in chart defaults or schema)\n  \
    - Type mismatches (string where int expected, etc.)\n  \
    - Required fields (from values.schema.json)\n  \
    - Deprecated keys (from values.schema.json)"
)]
#[command(version)]
pub struct Args {
    /// Values file(s) to validate
    #[arg(short = 'f', long = "file", value_name = "FILE", required = true, num_args = 1..)]
    pub files: Vec<String>,

    /// Local chart directory
    #[arg(long, value_name = "PATH")]
    pub chart: String,

    /// Expected chart version
    #[arg(long = "chart-version", value_name = "VERSION")]
    pub chart_version: Option<String>,

    /// Output format: text or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Exit with code 2 when only warnings are found
    #[arg(long)]
    pub strict: bool,

    /// Key paths to ignore (glob patterns, e.g. 'global.*')
    #[arg(long = "ignore-keys", value_name = "PATTERNS", value_delimiter = ',')]
    pub ignore_keys: Vec<String>,

    /// Configuration file path (defaults to ./.values-checker.yaml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

//! Command-line interface definitions for benchviz.

use std::path::PathBuf;

use clap::Parser;

/// Render scaling and performance charts from recorded benchmark reports.
///
/// With no arguments, reads `./Performance_Results` and writes SVG charts to
/// `./Performance_Results/visualizations`.
#[derive(Parser)]
#[command(name = "benchviz", version, about)]
pub struct Cli {
    /// Configuration file (default: `benchviz.toml` in the working directory, if present).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Results directory holding the reports (overrides the configuration).
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Directory the charts are written to, relative to the working directory
    /// (overrides the configuration).
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Also write the extracted tables as JSON to this path.
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Print the extracted tables.
    #[arg(long)]
    pub summary: bool,

    /// Show only errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show resolved paths, row counts and timings.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

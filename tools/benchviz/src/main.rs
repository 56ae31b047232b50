//! Benchmark chart renderer.
//!
//! Reads the scaling and performance reports recorded by the parallel
//! algorithm benchmark suite and renders comparative SVG charts.
//!
//! Pipeline: resolve config → load reports → draw combined charts →
//!           draw per-algorithm charts → optional summary / JSON export.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use benchplot::{Error, RenderConfig, Renderer, dprintln, export, output, verbose};
use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    dprintln!("Generating performance visualization graphs...");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Resolve the configuration with command-line overrides applied.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let mut config = RenderConfig::discover(cli.config.as_deref(), &cwd)?;
    if let Some(dir) = &cli.results_dir {
        config.results_dir.clone_from(dir);
    }
    if let Some(dir) = &cli.output_dir {
        config.override_output_dir(dir, &cwd);
    }
    Ok(config)
}

fn run(cli: &cli::Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let renderer = Renderer::new(config);
    let summary = renderer.render_all()?;

    if cli.summary {
        output::print_summary(&summary.datasets);
    }

    if let Some(path) = &cli.export_json {
        export::save_json(&renderer.config().results_dir, &summary.datasets, path)?;
        dprintln!("Extracted tables written to {}", path.display());
    }

    dprintln!("Visualization generation complete!");
    dprintln!(
        "All visualizations saved to {}",
        renderer.config().output_dir().display()
    );
    if summary.warnings > 0 || !summary.failures.is_empty() {
        dprintln!(
            "  {} chart(s) written, {} warning(s), {} algorithm(s) failed",
            summary.written.len(),
            summary.warnings,
            summary.failures.len()
        );
    }
    Ok(())
}

/// Report a run-aborting error, with instructions when the inputs are absent.
fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<Error>() {
        Some(Error::MissingResults(dir)) => {
            eprintln!("Error: benchmark results not found at {}.", dir.display());
            eprintln!("Run the benchmark suite first so it records its reports there,");
            eprintln!("or point benchviz at them with:");
            eprintln!("    benchviz --results-dir <path>");
            eprintln!("    (or `results-dir = \"<path>\"` in benchviz.toml)");
        }
        _ => eprintln!("Error generating visualizations: {e:#}"),
    }
}

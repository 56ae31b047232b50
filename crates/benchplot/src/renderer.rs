//! Chart rendering pipeline.
//!
//! Loads every configured algorithm's reports, then writes the combined
//! scaling chart, the combined performance chart and one chart per
//! algorithm, in that order. Per-algorithm problems are reported and skipped;
//! only failures writing a combined chart abort the run.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::algorithm::Algorithm;
use crate::chart;
use crate::config::RenderConfig;
use crate::dataset::{AlgorithmDataset, DatasetLoader};
use crate::error::Error;
use crate::verbose::Timer;
use crate::{dprintln, vprintln};

/// File name of the combined core-scaling chart.
pub const SCALING_CHART: &str = "scaling_analysis.svg";
/// File name of the combined input-size chart.
pub const PERFORMANCE_CHART: &str = "performance_analysis.svg";

/// Outcome of a rendering run.
#[derive(Debug, Default)]
pub struct RenderSummary {
    /// Every dataset loaded, in configuration order.
    pub datasets: Vec<AlgorithmDataset>,
    /// Chart files written, in the order they were saved.
    pub written: Vec<PathBuf>,
    /// Missing-report, empty-table and raw-result warnings.
    pub warnings: usize,
    /// Reports or charts that failed, by algorithm, with the error message.
    pub failures: Vec<(Algorithm, String)>,
}

/// Draws all charts for one configuration.
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Renderer for `config`.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Path of an algorithm's own chart.
    pub fn algorithm_chart_path(&self, algorithm: Algorithm) -> PathBuf {
        self.config
            .output_dir()
            .join(format!("{}_analysis.svg", algorithm.slug()))
    }

    /// Load the reports of every configured algorithm.
    ///
    /// A report that cannot be processed is logged and recorded in
    /// `summary.failures`; the algorithm keeps whatever its other report holds.
    pub fn load_datasets(&self, summary: &mut RenderSummary) {
        let mut loader = DatasetLoader::new(&self.config);
        for entry in &self.config.algorithms {
            summary.datasets.push(loader.load(entry));
        }
        summary.warnings += loader.warnings();
        summary.failures.extend(loader.take_failures());
    }

    /// Load all reports and write every chart.
    pub fn render_all(&self) -> Result<RenderSummary> {
        if !self.config.results_dir.is_dir() {
            return Err(Error::MissingResults(self.config.results_dir.clone()).into());
        }

        let output_dir = self.config.output_dir();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating output directory {}", output_dir.display()))?;
        vprintln!("Writing charts to {}", output_dir.display());

        let mut summary = RenderSummary::default();
        self.load_datasets(&mut summary);
        let with_data: Vec<&AlgorithmDataset> =
            summary.datasets.iter().filter(|d| !d.is_empty()).collect();

        let scaling_path = output_dir.join(SCALING_CHART);
        {
            let _t = Timer::start("scaling chart");
            chart::draw_scaling_chart(&scaling_path, &with_data)
                .context("drawing scaling analysis chart")?;
        }
        dprintln!("Scaling analysis plot saved to {}", scaling_path.display());

        let performance_path = output_dir.join(PERFORMANCE_CHART);
        {
            let _t = Timer::start("performance chart");
            chart::draw_performance_chart(&performance_path, &with_data)
                .context("drawing performance analysis chart")?;
        }
        dprintln!(
            "Performance analysis plot saved to {}",
            performance_path.display()
        );

        let mut written = vec![scaling_path, performance_path];
        let mut failures = Vec::new();
        for dataset in &summary.datasets {
            let algorithm = dataset.algorithm;
            let path = self.algorithm_chart_path(algorithm);
            let _t = Timer::start(format!("{algorithm} chart"));
            match chart::draw_algorithm_chart(&path, dataset) {
                Ok(()) => {
                    dprintln!("Analysis plots for {algorithm} saved to {}", path.display());
                    written.push(path);
                }
                Err(e) => {
                    eprintln!("Error drawing charts for {algorithm}: {e:#}");
                    failures.push((algorithm, format!("{e:#}")));
                }
            }
        }

        summary.written = written;
        summary.failures.extend(failures);
        Ok(summary)
    }
}

//! Per-algorithm report loading.
//!
//! Resolves each algorithm's report paths, scrapes the tables and applies size
//! correction. Missing reports and empty tables are warnings: the report kind
//! comes back as `None` and the charts go on without it. A report that cannot
//! be processed is an error of that report only; the algorithm's other report
//! is still loaded.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::algorithm::{Algorithm, Rgb};
use crate::config::{AlgorithmEntry, RenderConfig};
use crate::correction::SizeCorrector;
use crate::table::{self, PerformanceRecord, ScalingRecord, TableRow};
use crate::{vprintln, wprintln};

/// Everything loaded for one algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDataset {
    /// Which algorithm the tables belong to.
    pub algorithm: Algorithm,
    /// Plot color for this algorithm.
    pub color: Rgb,
    /// Core-scaling rows, if the report exists and has rows.
    pub scaling: Option<Vec<ScalingRecord>>,
    /// Input-size rows, if the report exists and has rows.
    pub performance: Option<Vec<PerformanceRecord>>,
    /// Whether `performance` sizes were replaced from raw results.
    pub sizes_corrected: bool,
}

impl AlgorithmDataset {
    /// Dataset with no tables.
    pub fn empty(algorithm: Algorithm, color: Rgb) -> Self {
        Self {
            algorithm,
            color,
            scaling: None,
            performance: None,
            sizes_corrected: false,
        }
    }

    /// Returns `true` if neither report produced rows.
    pub fn is_empty(&self) -> bool {
        self.scaling.is_none() && self.performance.is_none()
    }
}

/// Loads report tables according to a [`RenderConfig`].
pub struct DatasetLoader<'a> {
    config: &'a RenderConfig,
    warnings: usize,
    failures: Vec<(Algorithm, String)>,
}

impl<'a> DatasetLoader<'a> {
    /// Loader over the configured results tree.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            warnings: 0,
            failures: Vec::new(),
        }
    }

    /// Number of missing-file, empty-table and raw-result warnings issued so far.
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    /// Reports that failed to load in [`load`](Self::load), with the error message.
    pub fn failures(&self) -> &[(Algorithm, String)] {
        &self.failures
    }

    /// Take the recorded failures, leaving none behind.
    pub fn take_failures(&mut self) -> Vec<(Algorithm, String)> {
        std::mem::take(&mut self.failures)
    }

    /// Load the scaling report of `algorithm`.
    pub fn load_scaling(&mut self, algorithm: Algorithm) -> Result<Option<Vec<ScalingRecord>>> {
        let path = self.config.scaling_path(algorithm);
        self.load_table(algorithm, "Scaling", &path)
    }

    /// Load the performance report of `algorithm`, correcting sizes if `correct` is set.
    ///
    /// Returns the rows and whether their sizes were replaced.
    pub fn load_performance(
        &mut self,
        algorithm: Algorithm,
        correct: bool,
    ) -> Result<(Option<Vec<PerformanceRecord>>, bool)> {
        let path = self.config.performance_path(algorithm);
        let Some(mut rows) = self.load_table(algorithm, "Performance", &path)? else {
            return Ok((None, false));
        };
        if !correct {
            return Ok((Some(rows), false));
        }
        let mut corrector = SizeCorrector::new(self.config);
        let corrected = corrector.correct(algorithm, &mut rows);
        self.warnings += corrector.warnings();
        Ok((Some(rows), corrected))
    }

    /// Load both reports for one configured algorithm.
    ///
    /// A report that fails is logged, recorded in [`failures`](Self::failures)
    /// and left out of the dataset.
    pub fn load(&mut self, entry: &AlgorithmEntry) -> AlgorithmDataset {
        let algorithm = entry.id;
        let mut dataset = AlgorithmDataset::empty(algorithm, entry.color());

        match self.load_scaling(algorithm) {
            Ok(scaling) => dataset.scaling = scaling,
            Err(e) => self.fail(algorithm, "scaling", &e),
        }
        match self.load_performance(algorithm, entry.corrects_sizes()) {
            Ok((performance, corrected)) => {
                dataset.performance = performance;
                dataset.sizes_corrected = corrected;
            }
            Err(e) => self.fail(algorithm, "performance", &e),
        }
        dataset
    }

    fn fail(&mut self, algorithm: Algorithm, kind: &str, e: &anyhow::Error) {
        eprintln!("Error processing {kind} data for {algorithm}: {e:#}");
        self.failures.push((algorithm, format!("{e:#}")));
    }

    fn load_table<R: TableRow>(
        &mut self,
        algorithm: Algorithm,
        kind: &str,
        path: &Path,
    ) -> Result<Option<Vec<R>>> {
        if !path.is_file() {
            wprintln!("{kind} file not found for {algorithm} at {}", path.display());
            self.warnings += 1;
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let rows: Vec<R> =
            table::extract(&text).with_context(|| format!("parsing {}", path.display()))?;
        if rows.is_empty() {
            wprintln!("No data found in {}", path.display());
            self.warnings += 1;
            return Ok(None);
        }
        vprintln!("  {algorithm}: {} {} rows from {}", rows.len(), kind.to_lowercase(), path.display());
        Ok(Some(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    fn config_in(dir: &tempfile::TempDir) -> RenderConfig {
        RenderConfig {
            results_dir: dir.path().to_path_buf(),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn bad_scaling_report_keeps_performance_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_in(&dir);
        write(
            &config.scaling_path(Algorithm::SampleSort),
            "| 1 | 100 | 1 | 1.0 |\n| 2 | 55 | 1 | 1.8.1 |\n",
        );
        write(
            &config.performance_path(Algorithm::SampleSort),
            "| 1000 | 3 | 1 |\n| 10000 | 21 | 2 |\n",
        );

        let mut loader = DatasetLoader::new(&config);
        let dataset = loader.load(&AlgorithmEntry::new(Algorithm::SampleSort));

        assert!(dataset.scaling.is_none());
        assert_eq!(dataset.performance.map(|rows| rows.len()), Some(2));
        assert_eq!(loader.failures().len(), 1);
        assert!(loader.failures()[0].1.contains("speedup"));
        assert_eq!(loader.warnings(), 0);
    }

    #[test]
    fn bad_performance_report_keeps_scaling_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_in(&dir);
        write(
            &config.scaling_path(Algorithm::RadixSort),
            "| 1 | 100 | 1 | 1.0 |\n| 2 | 55 | 1 | 1.8 |\n",
        );
        write(
            &config.performance_path(Algorithm::RadixSort),
            "| 99999999999999999999999 | 3 | 1 |\n",
        );

        let mut loader = DatasetLoader::new(&config);
        let dataset = loader.load(&AlgorithmEntry::new(Algorithm::RadixSort));

        assert_eq!(dataset.scaling.map(|rows| rows.len()), Some(2));
        assert!(dataset.performance.is_none());
        let failures = loader.take_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, Algorithm::RadixSort);
        assert!(loader.failures().is_empty());
    }

    #[test]
    fn missing_raw_results_are_warnings() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_in(&dir);
        write(
            &config.performance_path(Algorithm::PrimeNumberSearch),
            "| 1000 | 3 | 1 |\n",
        );

        let mut loader = DatasetLoader::new(&config);
        let (rows, corrected) = loader
            .load_performance(Algorithm::PrimeNumberSearch, true)
            .unwrap();

        assert_eq!(rows.map(|rows| rows[0].input_size), Some(1000));
        assert!(!corrected);
        assert_eq!(loader.warnings(), config.correction.categories.len());
    }
}

//! Renderer configuration.
//!
//! Everything the renderer needs to find its inputs and place its outputs:
//! the results tree layout, file name templates, the algorithm list and which
//! algorithms get their input sizes corrected. Loaded from an optional
//! `benchviz.toml`; every field has a default matching the layout written by
//! the benchmark suite.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::algorithm::{Algorithm, Rgb};
use crate::error::Error;

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "benchviz.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RenderConfig {
    /// Root of the recorded benchmark results.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Directory of the core-scaling reports, relative to `results_dir`.
    #[serde(default = "default_scaling_dir")]
    pub scaling_dir: PathBuf,
    /// Directory charts are written to, relative to `results_dir`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Scaling report file name template (`{stem}` is substituted).
    #[serde(default = "default_scaling_file")]
    pub scaling_file: String,
    /// Performance report file name template (`{stem}` is substituted).
    #[serde(default = "default_performance_file")]
    pub performance_file: String,
    /// Size correction inputs.
    #[serde(default)]
    pub correction: CorrectionConfig,
    /// Algorithms to chart, in legend order.
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<AlgorithmEntry>,
}

/// `[correction]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CorrectionConfig {
    /// Raw result file template, relative to `results_dir`
    /// (`{index}` and `{category}` are substituted).
    #[serde(default = "default_raw_result_file")]
    pub raw_result_file: String,
    /// Size categories, in the order of the performance table rows.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            raw_result_file: default_raw_result_file(),
            categories: default_categories(),
        }
    }
}

/// `[[algorithms]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AlgorithmEntry {
    /// Which algorithm this entry configures.
    pub id: Algorithm,
    /// Plot color override.
    #[serde(default)]
    pub color: Option<Rgb>,
    /// Correct recorded input sizes from raw result files.
    #[serde(default)]
    pub correct_sizes: Option<bool>,
}

impl AlgorithmEntry {
    /// Entry with every setting at the algorithm's default.
    pub fn new(id: Algorithm) -> Self {
        Self {
            id,
            color: None,
            correct_sizes: None,
        }
    }

    /// Effective plot color.
    pub fn color(&self) -> Rgb {
        self.color.unwrap_or_else(|| self.id.default_color())
    }

    /// Whether size correction applies to this algorithm.
    pub fn corrects_sizes(&self) -> bool {
        self.correct_sizes
            .unwrap_or_else(|| self.id.corrects_sizes_by_default())
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("./Performance_Results")
}
fn default_scaling_dir() -> PathBuf {
    PathBuf::from("core_scaling")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("visualizations")
}
fn default_scaling_file() -> String {
    "{stem}_scaling_analysis.md".into()
}
fn default_performance_file() -> String {
    "{stem}_analysis.md".into()
}
fn default_raw_result_file() -> String {
    "algo_{index}/{category}_result.txt".into()
}
fn default_categories() -> Vec<String> {
    ["small", "medium", "large", "very_large"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_algorithms() -> Vec<AlgorithmEntry> {
    Algorithm::ALL.into_iter().map(AlgorithmEntry::new).collect()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            scaling_dir: default_scaling_dir(),
            output_dir: default_output_dir(),
            scaling_file: default_scaling_file(),
            performance_file: default_performance_file(),
            correction: CorrectionConfig::default(),
            algorithms: default_algorithms(),
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::InvalidConfig {
            path: origin.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, else `benchviz.toml` from `dir` if present, else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            crate::vprintln!("Using configuration {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self, origin: &Path) -> Result<()> {
        let invalid = |reason: String| Error::InvalidConfig {
            path: origin.to_path_buf(),
            reason,
        };
        for (i, entry) in self.algorithms.iter().enumerate() {
            if self.algorithms[..i].iter().any(|e| e.id == entry.id) {
                return Err(invalid(format!("algorithm '{}' listed twice", entry.id)).into());
            }
        }
        for template in [&self.scaling_file, &self.performance_file] {
            if !template.contains("{stem}") {
                return Err(invalid(format!("file template '{template}' lacks {{stem}}")).into());
            }
        }
        if !self.correction.raw_result_file.contains("{category}") {
            return Err(invalid(format!(
                "raw result template '{}' lacks {{category}}",
                self.correction.raw_result_file
            ))
            .into());
        }
        Ok(())
    }

    /// Directory holding the scaling reports.
    pub fn scaling_dir(&self) -> PathBuf {
        self.results_dir.join(&self.scaling_dir)
    }

    /// Directory the charts are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.results_dir.join(&self.output_dir)
    }

    /// Write charts to `dir` given on the command line.
    ///
    /// Unlike the configured `output-dir`, a relative `dir` is taken from
    /// `cwd`, not from the results directory.
    pub fn override_output_dir(&mut self, dir: &Path, cwd: &Path) {
        self.output_dir = cwd.join(dir);
    }

    /// Path of an algorithm's scaling report.
    pub fn scaling_path(&self, algorithm: Algorithm) -> PathBuf {
        self.scaling_dir()
            .join(self.scaling_file.replace("{stem}", &algorithm.file_stem()))
    }

    /// Path of an algorithm's performance report.
    pub fn performance_path(&self, algorithm: Algorithm) -> PathBuf {
        self.results_dir
            .join(self.performance_file.replace("{stem}", &algorithm.file_stem()))
    }

    /// Path of an algorithm's raw result file for one size category.
    pub fn raw_result_path(&self, algorithm: Algorithm, category: &str) -> PathBuf {
        self.results_dir.join(
            self.correction
                .raw_result_file
                .replace("{index}", &algorithm.number().to_string())
                .replace("{category}", category),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_results_layout() {
        let config = RenderConfig::default();
        assert_eq!(
            config.scaling_path(Algorithm::PrimeNumberSearch),
            Path::new("./Performance_Results/core_scaling/prime_search_scaling_analysis.md")
        );
        assert_eq!(
            config.performance_path(Algorithm::RadixSort),
            Path::new("./Performance_Results/radix_sort_analysis.md")
        );
        assert_eq!(
            config.raw_result_path(Algorithm::PrimeNumberSearch, "very_large"),
            Path::new("./Performance_Results/algo_2/very_large_result.txt")
        );
        assert_eq!(
            config.output_dir(),
            Path::new("./Performance_Results/visualizations")
        );
        assert_eq!(config.algorithms.len(), 5);
    }

    #[test]
    fn output_override_is_relative_to_working_directory() {
        let mut config = RenderConfig {
            results_dir: "runs/results".into(),
            ..RenderConfig::default()
        };
        config.override_output_dir(Path::new("charts"), Path::new("/work"));
        assert_eq!(config.output_dir(), Path::new("/work/charts"));

        config.override_output_dir(Path::new("/tmp/charts"), Path::new("/work"));
        assert_eq!(config.output_dir(), Path::new("/tmp/charts"));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = RenderConfig::from_toml("", Path::new("benchviz.toml")).unwrap();
        assert_eq!(config.results_dir, Path::new("./Performance_Results"));
        assert_eq!(config.correction.categories.len(), 4);
        let ids: Vec<Algorithm> = config.algorithms.iter().map(|e| e.id).collect();
        assert_eq!(ids, Algorithm::ALL.to_vec());
    }

    #[test]
    fn parse_full_config() {
        let text = r##"
results-dir = "/data/results"
output-dir = "/tmp/charts"
scaling-file = "{stem}.scaling.md"

[correction]
categories = ["tiny", "huge"]

[[algorithms]]
id = "radix-sort"
color = "#123456"

[[algorithms]]
id = "quick-search"
correct-sizes = true
"##;
        let config = RenderConfig::from_toml(text, Path::new("benchviz.toml")).unwrap();
        assert_eq!(config.output_dir(), Path::new("/tmp/charts"));
        assert_eq!(
            config.scaling_path(Algorithm::RadixSort),
            Path::new("/data/results/core_scaling/radix_sort.scaling.md")
        );
        assert_eq!(config.correction.categories, vec!["tiny", "huge"]);
        assert_eq!(config.algorithms.len(), 2);
        assert_eq!(config.algorithms[0].color(), Rgb(0x12, 0x34, 0x56));
        assert!(!config.algorithms[0].corrects_sizes());
        assert!(config.algorithms[1].corrects_sizes());
        assert_eq!(
            config.algorithms[1].color(),
            Algorithm::QuickSearch.default_color()
        );
    }

    #[test]
    fn reject_unknown_algorithm() {
        let err = RenderConfig::from_toml("[[algorithms]]\nid = \"bogo-sort\"\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn reject_bad_color() {
        let text = "[[algorithms]]\nid = \"sample-sort\"\ncolor = \"magenta\"\n";
        assert!(RenderConfig::from_toml(text, Path::new("x.toml")).is_err());
    }

    #[test]
    fn reject_duplicate_algorithm() {
        let text = "[[algorithms]]\nid = \"sample-sort\"\n[[algorithms]]\nid = \"sample-sort\"\n";
        let err = RenderConfig::from_toml(text, Path::new("x.toml")).unwrap_err();
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn reject_template_without_stem() {
        let err = RenderConfig::from_toml("performance-file = \"perf.md\"\n", Path::new("x.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("{stem}"));
    }
}

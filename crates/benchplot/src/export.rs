//! JSON export of loaded datasets.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::dataset::AlgorithmDataset;

/// A JSON file containing every table the renderer charted.
#[derive(Debug, Serialize)]
pub struct DatasetExport<'a> {
    /// Results directory the tables were read from.
    pub results_dir: &'a Path,
    /// Per-algorithm tables, in chart order.
    pub algorithms: &'a [AlgorithmDataset],
}

/// Serialize `datasets` as pretty JSON.
pub fn to_json(results_dir: &Path, datasets: &[AlgorithmDataset]) -> Result<String> {
    let export = DatasetExport {
        results_dir,
        algorithms: datasets,
    };
    serde_json::to_string_pretty(&export).context("serializing datasets to JSON")
}

/// Write `datasets` as a JSON file.
pub fn save_json(results_dir: &Path, datasets: &[AlgorithmDataset], path: &Path) -> Result<()> {
    let json = to_json(results_dir, datasets)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("writing datasets to {}", path.display()))?;
    Ok(())
}

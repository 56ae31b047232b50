//! Pipe-delimited table extraction from markdown benchmark reports.
//!
//! This is a best-effort scrape: every span of text matching the row shape
//! becomes a record, everything else (headers, separator lines, prose) is
//! ignored. A report without matching rows yields an empty table.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// `| cores | user_ms | sys_ms | speedup |`
static SCALING_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*([\d.]+)\s*\|")
        .expect("scaling row pattern is valid")
});

/// `| size | user_ms | sys_ms |`
static PERFORMANCE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\d+)\s*\|")
        .expect("performance row pattern is valid")
});

/// The two table layouts found in benchmark reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Core count, user time, system time, speedup.
    Scaling,
    /// Input size, user time, system time.
    Performance,
}

impl RowShape {
    /// Number of captured columns.
    pub fn columns(self) -> usize {
        match self {
            RowShape::Scaling => 4,
            RowShape::Performance => 3,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            RowShape::Scaling => &SCALING_ROW,
            RowShape::Performance => &PERFORMANCE_ROW,
        }
    }
}

/// One row of a core-scaling report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingRecord {
    /// Number of cores the run used.
    pub core_count: u32,
    /// User CPU time in milliseconds.
    pub user_time_ms: u64,
    /// System CPU time in milliseconds.
    pub sys_time_ms: u64,
    /// Single-core time divided by the time at this core count.
    pub speedup: f64,
}

/// One row of an input-size performance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Problem size of the run.
    pub input_size: u64,
    /// User CPU time in milliseconds.
    pub user_time_ms: u64,
    /// System CPU time in milliseconds.
    pub sys_time_ms: u64,
}

/// A record type that can be scraped from a table row.
pub trait TableRow: Sized {
    /// Layout of the row in the report.
    const SHAPE: RowShape;

    /// Build a record from the captured cells of one matching row.
    fn from_cells(cells: &Captures<'_>) -> Result<Self>;
}

impl TableRow for ScalingRecord {
    const SHAPE: RowShape = RowShape::Scaling;

    fn from_cells(cells: &Captures<'_>) -> Result<Self> {
        let speedup: f64 = cell(cells, 4, "speedup")?;
        anyhow::ensure!(speedup.is_finite(), "speedup value is out of range");
        Ok(Self {
            core_count: cell(cells, 1, "core count")?,
            user_time_ms: cell(cells, 2, "user time")?,
            sys_time_ms: cell(cells, 3, "system time")?,
            speedup,
        })
    }
}

impl TableRow for PerformanceRecord {
    const SHAPE: RowShape = RowShape::Performance;

    fn from_cells(cells: &Captures<'_>) -> Result<Self> {
        Ok(Self {
            input_size: cell(cells, 1, "input size")?,
            user_time_ms: cell(cells, 2, "user time")?,
            sys_time_ms: cell(cells, 3, "system time")?,
        })
    }
}

/// Parse one captured cell, naming the column on failure.
fn cell<T>(cells: &Captures<'_>, index: usize, column: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = cells.get(index).map_or("", |m| m.as_str());
    raw.parse()
        .with_context(|| format!("invalid {column} value '{raw}'"))
}

/// Extract every row of shape `R` from `text`, in document order.
///
/// Returns an empty vector when nothing matches. Only numeric conversion
/// failures (a cell that matches the pattern but does not fit the field type)
/// produce an error.
pub fn extract<R: TableRow>(text: &str) -> Result<Vec<R>> {
    R::SHAPE
        .pattern()
        .captures_iter(text)
        .enumerate()
        .map(|(i, caps)| R::from_cells(&caps).with_context(|| format!("table row {}", i + 1)))
        .collect()
}

/// Extract the rows of a core-scaling report.
pub fn extract_scaling(text: &str) -> Result<Vec<ScalingRecord>> {
    extract(text)
}

/// Extract the rows of an input-size performance report.
pub fn extract_performance(text: &str) -> Result<Vec<PerformanceRecord>> {
    extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALING_REPORT: &str = "\
# Bitonic Sort Scaling Analysis

Input size: 1048576 elements

| Cores | User Time (ms) | Sys Time (ms) | Speedup |
|-------|----------------|---------------|---------|
| 1 | 503 | 10 | 1.0 |
| 2 | 252 | 8 | 2.0 |
| 4 | 122 | 6 | 4.0 |
| 8 | 78 | 5 | 6.4 |

Speedup is relative to the single-core run.
";

    #[test]
    fn extract_scaling_rows_in_order() {
        let rows = extract_scaling(SCALING_REPORT).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[0],
            ScalingRecord {
                core_count: 1,
                user_time_ms: 503,
                sys_time_ms: 10,
                speedup: 1.0,
            }
        );
        let cores: Vec<u32> = rows.iter().map(|r| r.core_count).collect();
        let speedups: Vec<f64> = rows.iter().map(|r| r.speedup).collect();
        assert_eq!(cores, vec![1, 2, 4, 8]);
        assert_eq!(speedups, vec![1.0, 2.0, 4.0, 6.4]);
    }

    #[test]
    fn single_row_yields_single_record() {
        let rows = extract_scaling("|16|40|3|12.25|").unwrap();
        assert_eq!(
            rows,
            vec![ScalingRecord {
                core_count: 16,
                user_time_ms: 40,
                sys_time_ms: 3,
                speedup: 12.25,
            }]
        );
    }

    #[test]
    fn extract_performance_rows() {
        let text = "\
| Input Size | User Time (ms) | Sys Time (ms) |
|------------|----------------|---------------|
| 1000 | 2 | 1 |
|   100000   |  35 |   4 |
| 10000000 | 4120 | 57 |
";
        let rows = extract_performance(text).unwrap();
        let sizes: Vec<u64> = rows.iter().map(|r| r.input_size).collect();
        assert_eq!(sizes, vec![1000, 100_000, 10_000_000]);
        assert_eq!(rows[2].user_time_ms, 4120);
        assert_eq!(rows[2].sys_time_ms, 57);
    }

    #[test]
    fn no_matching_rows_is_empty() {
        for text in [
            "",
            "no tables here",
            "| Cores | User Time (ms) |\n|---|---|",
            "| 1 | 2 |",
            "| a | b | c | d |",
        ] {
            assert!(extract_scaling(text).unwrap().is_empty(), "{text:?}");
        }
        assert!(extract_performance("| 1 | 2 |").unwrap().is_empty());
    }

    #[test]
    fn header_and_prose_lines_are_skipped() {
        let text = "Ran with | 4 | threads\n| 2 | 252 | 8 |\nsummary: fast";
        let rows = extract_performance(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].input_size, 2);
    }

    #[test]
    fn malformed_speedup_is_an_error() {
        let err = extract_scaling("| 2 | 252 | 8 | 2.0.1 |").unwrap_err();
        assert!(format!("{err:#}").contains("speedup"));
    }

    #[test]
    fn unrepresentable_speedup_is_an_error() {
        let huge = format!("| 2 | 55 | 1 | {}.0 |", "9".repeat(400));
        let err = extract_scaling(&huge).unwrap_err();
        assert!(format!("{err:#}").contains("speedup"));
    }

    #[test]
    fn overflowing_core_count_is_an_error() {
        assert!(extract_scaling("| 99999999999 | 1 | 1 | 1.0 |").is_err());
    }

    #[test]
    fn shapes_report_column_counts() {
        assert_eq!(RowShape::Scaling.columns(), 4);
        assert_eq!(RowShape::Performance.columns(), 3);
    }
}

//! Benchmark report extraction and chart rendering.
//!
//! Scrapes pipe-delimited measurement tables out of markdown scaling and
//! performance reports, corrects the recorded input sizes of range-based
//! algorithms from their raw result files, and renders comparative SVG
//! charts of execution time and speedup.
//!
//! Pipeline: resolve [`RenderConfig`] → load datasets per algorithm →
//!           draw combined charts → draw per-algorithm charts.

pub mod verbose;

pub mod algorithm;
pub mod chart;
pub mod config;
pub mod correction;
pub mod dataset;
pub mod error;
pub mod export;
pub mod output;
pub mod renderer;
pub mod table;

pub use algorithm::Algorithm;
pub use config::RenderConfig;
pub use error::Error;
pub use renderer::{RenderSummary, Renderer};
pub use table::{PerformanceRecord, ScalingRecord};

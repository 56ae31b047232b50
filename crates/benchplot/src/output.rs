//! Terminal output formatting for extracted report tables.

use crate::dataset::AlgorithmDataset;
use crate::table::{PerformanceRecord, ScalingRecord};

/// Print the scaling table of one algorithm.
pub fn print_scaling_table(name: &str, rows: &[ScalingRecord]) {
    if rows.is_empty() {
        println!("  No scaling results to display for {name}.");
        return;
    }

    println!();
    println!("  {name} - core scaling");
    println!(
        "  {:>6}  {:>14}  {:>14}  {:>8}",
        "Cores", "User (ms)", "Sys (ms)", "Speedup"
    );
    println!("  {:->6}  {:->14}  {:->14}  {:->8}", "", "", "", "");

    for row in rows {
        println!(
            "  {:>6}  {:>14}  {:>14}  {:>8.2}",
            row.core_count, row.user_time_ms, row.sys_time_ms, row.speedup
        );
    }
}

/// Print the performance table of one algorithm.
pub fn print_performance_table(name: &str, rows: &[PerformanceRecord], corrected: bool) {
    if rows.is_empty() {
        println!("  No performance results to display for {name}.");
        return;
    }

    // Column width follows the widest input size.
    let size_width = rows
        .iter()
        .map(|r| r.input_size.to_string().len())
        .max()
        .unwrap_or(10)
        .max(10);

    println!();
    if corrected {
        println!("  {name} - input size (sizes corrected from raw results)");
    } else {
        println!("  {name} - input size");
    }
    println!(
        "  {:>width$}  {:>14}  {:>14}",
        "Input size",
        "User (ms)",
        "Sys (ms)",
        width = size_width
    );
    println!(
        "  {:->width$}  {:->14}  {:->14}",
        "",
        "",
        "",
        width = size_width
    );

    for row in rows {
        println!(
            "  {:>width$}  {:>14}  {:>14}",
            row.input_size,
            row.user_time_ms,
            row.sys_time_ms,
            width = size_width
        );
    }
}

/// Print every table loaded for a set of algorithms.
pub fn print_summary(datasets: &[AlgorithmDataset]) {
    if datasets.iter().all(AlgorithmDataset::is_empty) {
        println!("  No benchmark results to display.");
        return;
    }

    for dataset in datasets {
        let name = dataset.algorithm.display_name();
        if let Some(rows) = &dataset.scaling {
            print_scaling_table(name, rows);
        }
        if let Some(rows) = &dataset.performance {
            print_performance_table(name, rows, dataset.sizes_corrected);
        }
    }
    println!();
}

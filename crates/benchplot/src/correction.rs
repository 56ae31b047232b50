//! Input size correction for range-based benchmarks.
//!
//! The prime search benchmark records a nominal size category in its
//! performance report, while the real problem size is the width of the range
//! it scanned. That range is printed in each run's raw output, so the sizes
//! are re-derived from there and swapped in when every row can be accounted
//! for.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::algorithm::Algorithm;
use crate::config::RenderConfig;
use crate::table::PerformanceRecord;
use crate::{vprintln, wprintln};

static PRIME_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Found \d+ primes between (\d+) and (\d+)").expect("prime range pattern is valid")
});

/// Width of the first `Found N primes between START and END` range in `text`.
///
/// Returns `None` when the line is absent, a bound does not fit in `u64`, or
/// the range is empty.
pub fn parse_prime_range(text: &str) -> Option<u64> {
    let caps = PRIME_RANGE.captures(text)?;
    let start: u64 = caps[1].parse().ok()?;
    let end: u64 = caps[2].parse().ok()?;
    end.checked_sub(start)?.checked_add(1)
}

/// Replace every record's input size with `sizes`, in order.
///
/// Only happens when the lengths agree; returns whether the replacement was made.
pub fn apply_sizes(records: &mut [PerformanceRecord], sizes: &[u64]) -> bool {
    if sizes.len() != records.len() {
        return false;
    }
    for (record, &size) in records.iter_mut().zip(sizes) {
        record.input_size = size;
    }
    true
}

/// Re-derives input sizes from raw result files.
pub struct SizeCorrector<'a> {
    config: &'a RenderConfig,
    warnings: usize,
}

impl<'a> SizeCorrector<'a> {
    /// Corrector reading raw results from the configured results tree.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            warnings: 0,
        }
    }

    /// Number of unreadable or range-less raw result files seen so far.
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    /// Magnitudes for every size category that could be corrected, in category order.
    ///
    /// Categories whose file is unreadable or lacks a usable range are
    /// logged, counted as warnings and left out.
    pub fn corrected_sizes(&mut self, algorithm: Algorithm) -> Vec<u64> {
        let config = self.config;
        let mut sizes = Vec::with_capacity(config.correction.categories.len());
        for category in &config.correction.categories {
            let path = config.raw_result_path(algorithm, category);
            if let Some(size) = self.read_range(&path) {
                vprintln!("  {algorithm} {category}: range size {size}");
                sizes.push(size);
            }
        }
        sizes
    }

    /// Correct `records` in place; returns whether the sizes were replaced.
    pub fn correct(&mut self, algorithm: Algorithm, records: &mut [PerformanceRecord]) -> bool {
        let sizes = self.corrected_sizes(algorithm);
        let applied = apply_sizes(records, &sizes);
        if applied {
            vprintln!("  {algorithm}: input sizes corrected from raw results");
        } else {
            vprintln!(
                "  {algorithm}: {} corrected sizes for {} rows, keeping recorded sizes",
                sizes.len(),
                records.len()
            );
        }
        applied
    }

    fn read_range(&mut self, path: &Path) -> Option<u64> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                wprintln!("cannot read raw result {}: {e}", path.display());
                self.warnings += 1;
                return None;
            }
        };
        let size = parse_prime_range(&text);
        if size.is_none() {
            wprintln!("no prime range found in {}", path.display());
            self.warnings += 1;
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(sizes: &[u64]) -> Vec<PerformanceRecord> {
        sizes
            .iter()
            .map(|&input_size| PerformanceRecord {
                input_size,
                user_time_ms: 10,
                sys_time_ms: 1,
            })
            .collect()
    }

    #[test]
    fn range_width_is_inclusive() {
        assert_eq!(
            parse_prime_range("Found 25 primes between 1 and 100\n"),
            Some(100)
        );
        assert_eq!(
            parse_prime_range("setup\nFound 1229 primes between 2 and 10000\ndone"),
            Some(9999)
        );
    }

    #[test]
    fn first_range_wins() {
        let text = "Found 4 primes between 1 and 10\nFound 25 primes between 1 and 100\n";
        assert_eq!(parse_prime_range(text), Some(10));
    }

    #[test]
    fn missing_or_inverted_range_is_none() {
        assert_eq!(parse_prime_range(""), None);
        assert_eq!(parse_prime_range("Found 25 prime numbers between 1 and 100"), None);
        assert_eq!(parse_prime_range("Found 0 primes between 100 and 1"), None);
        assert_eq!(
            parse_prime_range("Found 0 primes between 1 and 99999999999999999999999"),
            None
        );
    }

    #[test]
    fn equal_counts_replace_sizes() {
        let mut rows = records(&[1, 2, 3, 4]);
        assert!(apply_sizes(&mut rows, &[100, 1000, 10_000, 100_000]));
        let sizes: Vec<u64> = rows.iter().map(|r| r.input_size).collect();
        assert_eq!(sizes, vec![100, 1000, 10_000, 100_000]);
    }

    #[test]
    fn short_counts_keep_sizes() {
        let mut rows = records(&[1, 2, 3, 4]);
        assert!(!apply_sizes(&mut rows, &[100, 1000, 10_000]));
        let sizes: Vec<u64> = rows.iter().map(|r| r.input_size).collect();
        assert_eq!(sizes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn unreadable_categories_are_skipped() {
        let mut config = RenderConfig::default();
        config.results_dir = "/nonexistent/benchviz-results".into();
        let mut corrector = SizeCorrector::new(&config);
        assert!(corrector
            .corrected_sizes(Algorithm::PrimeNumberSearch)
            .is_empty());
        assert_eq!(corrector.warnings(), 4);

        let mut rows = records(&[1, 2, 3, 4]);
        assert!(!corrector.correct(Algorithm::PrimeNumberSearch, &mut rows));
        assert_eq!(rows[3].input_size, 4);
        assert_eq!(corrector.warnings(), 8);
    }

    #[test]
    fn rangeless_output_is_counted() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = RenderConfig::default();
        config.results_dir = dir.path().to_path_buf();
        for (category, text) in [
            ("small", "Found 3 primes between 1 and 10\n"),
            ("medium", "Found 25 primes between 1 and 100\n"),
            ("large", "Segmentation fault\n"),
        ] {
            let path = config.raw_result_path(Algorithm::PrimeNumberSearch, category);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, text).unwrap();
        }

        let mut corrector = SizeCorrector::new(&config);
        let sizes = corrector.corrected_sizes(Algorithm::PrimeNumberSearch);

        assert_eq!(sizes, vec![10, 100]);
        // One file without a range, one file missing.
        assert_eq!(corrector.warnings(), 2);
    }
}

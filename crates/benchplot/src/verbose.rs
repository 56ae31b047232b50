//! Console output levels for the renderer and its front-end.
//!
//! `-q` leaves errors only, `-v` adds resolved paths, row counts and chart
//! timings. Progress lines and warnings print at the default level.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

const QUIET: u8 = 0;
const NORMAL: u8 = 1;
const VERBOSE: u8 = 2;

static LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

/// Set the output level from the `--quiet` / `--verbose` flags.
pub fn init(quiet: bool, verbose: bool) {
    let level = match (quiet, verbose) {
        (true, _) => QUIET,
        (false, true) => VERBOSE,
        (false, false) => NORMAL,
    };
    LEVEL.store(level, Ordering::Relaxed);
}

/// Whether `-v` output is enabled.
pub fn is_verbose() -> bool {
    LEVEL.load(Ordering::Relaxed) == VERBOSE
}

/// Whether everything but errors is suppressed.
pub fn is_quiet() -> bool {
    LEVEL.load(Ordering::Relaxed) == QUIET
}

/// `println!` that only prints with `-v`.
#[macro_export]
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

/// `println!` for progress lines; silent with `-q`.
///
/// ```ignore
/// dprintln!("Scaling analysis plot saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// `Warning:`-prefixed line on stderr; silent with `-q`.
#[macro_export]
macro_rules! wprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            eprintln!("Warning: {}", format_args!($($arg)*));
        }
    };
}

/// Prints how long a chart took to draw when dropped, with `-v` only.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Start timing the chart named `label`.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if is_verbose() {
            println!("  {} drawn in {:.1?}", self.label, self.start.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        init(true, true);
        assert!(is_quiet() && !is_verbose());
        init(false, true);
        assert!(is_verbose() && !is_quiet());
        init(false, false);
        assert!(!is_verbose() && !is_quiet());
    }
}

//! Error conditions the command-line front-end recognises by type.
//!
//! Everything else travels as a plain [`anyhow::Error`] with context.

use std::path::PathBuf;

use thiserror::Error;

/// Typed failures raised by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The results directory holding the benchmark reports does not exist.
    #[error("benchmark results directory not found: {}", .0.display())]
    MissingResults(PathBuf),

    /// The configuration file could not be interpreted.
    #[error("invalid configuration {}: {reason}", path.display())]
    InvalidConfig {
        /// Configuration file that was rejected.
        path: PathBuf,
        /// Parser or validation message.
        reason: String,
    },

    /// A color string is not of the form `#rrggbb`.
    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

//! Benchmarked algorithm identities and their plot colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the parallel algorithms whose reports are charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Parallel search over a sorted array.
    QuickSearch,
    /// Prime counting over a numeric range.
    PrimeNumberSearch,
    /// Bitonic sorting network.
    BitonicSort,
    /// LSD radix sort.
    RadixSort,
    /// Sample sort.
    SampleSort,
}

impl Algorithm {
    /// All algorithms in report order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::QuickSearch,
        Algorithm::PrimeNumberSearch,
        Algorithm::BitonicSort,
        Algorithm::RadixSort,
        Algorithm::SampleSort,
    ];

    /// 1-based algorithm number, as used by the `algo_<n>` raw result directories.
    pub fn number(self) -> u32 {
        match self {
            Algorithm::QuickSearch => 1,
            Algorithm::PrimeNumberSearch => 2,
            Algorithm::BitonicSort => 3,
            Algorithm::RadixSort => 4,
            Algorithm::SampleSort => 5,
        }
    }

    /// Human-readable name used in chart titles and legends.
    pub fn display_name(self) -> &'static str {
        match self {
            Algorithm::QuickSearch => "Quick Search",
            Algorithm::PrimeNumberSearch => "Prime Number Search",
            Algorithm::BitonicSort => "Bitonic Sort",
            Algorithm::RadixSort => "Radix Sort",
            Algorithm::SampleSort => "Sample Sort",
        }
    }

    /// Name fragment used for this algorithm's output chart.
    pub fn slug(self) -> String {
        slugify(self.display_name())
    }

    /// Name fragment used for this algorithm's report files.
    ///
    /// The prime search reports were recorded under a shortened name.
    pub fn file_stem(self) -> String {
        match self {
            Algorithm::PrimeNumberSearch => "prime_search".to_string(),
            other => other.slug(),
        }
    }

    /// Default plot color (blue, green, red, cyan, magenta in report order).
    pub fn default_color(self) -> Rgb {
        match self {
            Algorithm::QuickSearch => Rgb(0, 0, 255),
            Algorithm::PrimeNumberSearch => Rgb(0, 128, 0),
            Algorithm::BitonicSort => Rgb(255, 0, 0),
            Algorithm::RadixSort => Rgb(0, 191, 191),
            Algorithm::SampleSort => Rgb(191, 0, 191),
        }
    }

    /// Whether the recorded input sizes need correcting from raw result files.
    pub fn corrects_sizes_by_default(self) -> bool {
        self == Algorithm::PrimeNumberSearch
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lowercase a display name, join words with `_` and drop apostrophes.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "_").replace('\'', "")
}

/// A 24-bit RGB plot color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
